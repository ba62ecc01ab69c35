//! Executor adapter implementations.

pub mod scripted_executor;

pub use scripted_executor::ScriptedExecutor;
