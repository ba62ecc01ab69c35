//! Job execution: pacing, worker loop, handlers, manager, breakpoints.

pub mod breakpoints;
pub mod error;
pub mod flow;
pub mod handler;
pub mod job;
pub mod manager;
pub mod runner;

pub use breakpoints::BreakpointController;
pub use error::JobError;
pub use flow::{FlowController, WaitingMode};
pub use handler::{JobHandler, JobHandlerFactory, LocalJobHandler, LocalJobHandlerFactory};
pub use manager::JobManager;
pub use runner::JobRunner;
