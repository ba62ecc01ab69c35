//! Cross-task blocking request bridge.
//!
//! Lets a worker task make a synchronous request that a different task
//! (typically the interaction loop) answers, without the requester knowing
//! who produces the answer.

pub mod request_queue;
pub mod user_context;

pub use request_queue::{
    request_queue, spawn_provider, Request, RequestError, RequestHandle, RequestReceiver,
};
pub use user_context::{user_context, UserContext, UserContextReceivers};
