//! Domain executor abstraction layer.
//!
//! The control layer drives procedure execution exclusively through the
//! [`base::ProcedureExecutor`] contract; what an instruction *does* is the
//! executor's business.

pub mod adapters;
pub mod base;
pub mod factory;

pub use adapters::ScriptedExecutor;
pub use base::{ExecutorError, ProcedureExecutor};
pub use factory::{ExecutorFactory, ScriptedExecutorFactory};
