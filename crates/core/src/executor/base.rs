//! Base ProcedureExecutor trait and supporting types.

use async_trait::async_trait;
use jk_protocol::procedure_models::Procedure;
use thiserror::Error;

/// Errors reported by a domain executor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// The executor cannot run without a bound procedure.
    #[error("No procedure is bound: {0}")]
    NoProcedure(String),
    /// The procedure definition was rejected.
    #[error("Invalid procedure: {0}")]
    InvalidProcedure(String),
    /// A single step failed during execution.
    #[error("Execution failed: {0}")]
    ExecutionError(String),
}

/// Contract between the control layer and a concrete procedure executor.
///
/// One executor instance serves one job. `execute_single` is only ever
/// called from the job's worker task; `halt` may be called concurrently
/// from any task and must interrupt the in-flight step on a best-effort
/// basis. The worker observes the halt cooperatively at the next tick
/// boundary.
#[async_trait]
pub trait ProcedureExecutor: Send + Sync {
    /// Bind the executor to a concrete procedure instance.
    async fn set_procedure(&self, procedure: Procedure) -> Result<(), ExecutorError>;

    /// Advance one unit of execution.
    ///
    /// Returns `Ok(true)` while more work remains, `Ok(false)` once the
    /// procedure has finished, and `Err` when the step itself failed.
    async fn execute_single(&self) -> Result<bool, ExecutorError>;

    /// True once the bound procedure has nothing left to execute.
    fn is_finished(&self) -> bool;

    /// Cooperative interrupt of the in-flight step.
    fn halt(&self);

    /// Return the executor to its initial state so the bound procedure can
    /// run again from scratch.
    async fn reset(&self) -> Result<(), ExecutorError>;
}
