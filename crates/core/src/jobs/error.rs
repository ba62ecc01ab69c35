//! Error types for job control operations.

use crate::executor::ExecutorError;
use jk_protocol::job_models::RunnerStatus;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while controlling jobs.
///
/// These are usage-contract violations: they are reported to the caller
/// and never retried internally. Cooperative interruption (stop, halt) is
/// not an error and does not appear here.
#[derive(Error, Debug)]
pub enum JobError {
    /// `start_request` on a job that is not in its initial state.
    #[error("Job cannot be started from status {status:?}; a running job may not be started twice")]
    AlreadyStarted { status: RunnerStatus },

    /// `reset` on a job that has not finished.
    #[error("Reset is only defined for finished jobs, current status is {status:?}")]
    ResetRequiresFinished { status: RunnerStatus },

    /// Operation referenced a job id the manager does not know.
    #[error("Unknown job {0}")]
    UnknownJob(Uuid),

    /// Attempt to remove or modify a job whose worker is still active.
    #[error("Attempt to modify running job {0}")]
    JobIsRunning(Uuid),

    /// Breakpoint restore without a prior save.
    #[error("No breakpoint snapshot has been saved")]
    MissingBreakpointSnapshot,

    /// Breakpoint toggle addressed a position outside the tree.
    #[error("No instruction at position {0}")]
    InvalidInstructionPosition(usize),

    /// The domain executor rejected an operation.
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}
