//! Job handlers: the per-kind control surface above the runner.
//!
//! The `JobManager` never talks to runners directly; each job is driven
//! through a `JobHandler`. `LocalJobHandler` runs the procedure in-process;
//! other kinds (remote, imported) would implement the same trait.

use crate::executor::{ExecutorFactory, ProcedureExecutor};
use crate::jobs::breakpoints::{toggle_breakpoint_at, BreakpointController};
use crate::jobs::error::JobError;
use crate::jobs::flow::FlowController;
use crate::jobs::runner::JobRunner;
use async_trait::async_trait;
use jk_protocol::ipc::Event;
use jk_protocol::job_models::{Job, RunnerStatus};
use jk_protocol::procedure_models::{BreakpointState, InstructionItem, Procedure};
use std::sync::Arc;
use std::sync::{Mutex as StdMutex, PoisonError};
use tokio::sync::{mpsc, Mutex};

/// Control contract every job kind implements.
#[async_trait]
pub trait JobHandler: Send + Sync {
    /// Start (not restart: starting a finished job is the manager's
    /// reset-then-start policy, not the handler's).
    async fn start(&self) -> Result<(), JobError>;

    /// Arm pause mode. No-op when the job is not running.
    async fn pause(&self);

    /// Release one tick; from the initial state, runs the first tick and
    /// pauses after it.
    async fn step(&self) -> Result<(), JobError>;

    /// Request cooperative termination.
    async fn stop(&self);

    /// Return a finished job to its initial state.
    async fn reset(&self) -> Result<(), JobError>;

    /// Stop and join the worker. After this the handler is inert until a
    /// reset.
    async fn shutdown(&self);

    /// Current runner status.
    async fn get_runner_status(&self) -> RunnerStatus;

    /// True while the worker may still produce status changes.
    async fn is_running(&self) -> bool;

    /// Extra per-tick delay in milliseconds; zero disables it.
    fn set_tick_timeout(&self, timeout_ms: u64);

    /// Shared job record.
    fn job(&self) -> Arc<Mutex<Job>>;
}

/// Runs a job in-process through a [`ProcedureExecutor`].
///
/// Besides driving the runner it owns the job's expanded instruction tree
/// (the UI-facing copy of the procedure) and keeps breakpoint placement
/// alive across resets: placement is snapshotted from the old tree and
/// reapplied to the freshly rebuilt one.
pub struct LocalJobHandler {
    procedure: Procedure,
    runner: JobRunner,
    expanded: StdMutex<Vec<InstructionItem>>,
    breakpoints: StdMutex<BreakpointController>,
}

impl LocalJobHandler {
    /// Bind `executor` to `procedure` and build the control surface.
    pub async fn new(
        procedure: Procedure,
        executor: Arc<dyn ProcedureExecutor>,
        job: Arc<Mutex<Job>>,
        events_tx: mpsc::Sender<Event>,
    ) -> Result<Self, JobError> {
        executor.set_procedure(procedure.clone()).await?;
        let flow = Arc::new(FlowController::new());
        let runner = JobRunner::new(executor, flow, job, events_tx);
        let expanded = procedure.instructions.clone();
        Ok(Self {
            procedure,
            runner,
            expanded: StdMutex::new(expanded),
            breakpoints: StdMutex::new(BreakpointController::new()),
        })
    }

    /// The procedure this handler was created for.
    pub fn procedure(&self) -> &Procedure {
        &self.procedure
    }

    /// Snapshot of the expanded instruction tree, breakpoints included.
    pub fn expanded_instructions(&self) -> Vec<InstructionItem> {
        self.expanded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Cycle the breakpoint at the given pre-order position.
    ///
    /// Ignored while the job is running (matching the toolbar behavior of
    /// not editing breakpoints mid-run).
    pub async fn toggle_breakpoint(&self, position: usize) -> Result<BreakpointState, JobError> {
        let job_id = self.runner.job().lock().await.id;
        if self.runner.is_busy().await {
            return Err(JobError::JobIsRunning(job_id));
        }
        let mut expanded = self.expanded.lock().unwrap_or_else(PoisonError::into_inner);
        toggle_breakpoint_at(&mut expanded, position)
    }

    fn rebuild_expanded_tree(&self) {
        let mut breakpoints = self
            .breakpoints
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut expanded = self.expanded.lock().unwrap_or_else(PoisonError::into_inner);

        breakpoints.save_breakpoints(&expanded);
        *expanded = self.procedure.instructions.clone();
        // the rebuilt tree has the same shape; restore cannot miss
        let _ = breakpoints.restore_breakpoints(&mut expanded);
    }
}

#[async_trait]
impl JobHandler for LocalJobHandler {
    async fn start(&self) -> Result<(), JobError> {
        if !self.runner.is_busy().await {
            let job = self.runner.job();
            let mut job = job.lock().await;
            job.log.clear();
        }
        self.runner.start_request().await
    }

    async fn pause(&self) {
        self.runner.pause_mode_on_request();
    }

    async fn step(&self) -> Result<(), JobError> {
        if self.runner.get_status().await == RunnerStatus::Initial {
            // run the first tick, then park at the boundary
            self.runner.pause_mode_on_request();
            return self.runner.start_request().await;
        }
        self.runner.pause_mode_on_request();
        self.runner.step_request();
        Ok(())
    }

    async fn stop(&self) {
        self.runner.stop_request();
    }

    async fn reset(&self) -> Result<(), JobError> {
        self.runner.reset().await?;
        self.rebuild_expanded_tree();
        Ok(())
    }

    async fn shutdown(&self) {
        self.runner.shutdown().await;
    }

    async fn get_runner_status(&self) -> RunnerStatus {
        self.runner.get_status().await
    }

    async fn is_running(&self) -> bool {
        self.runner.is_busy().await
    }

    fn set_tick_timeout(&self, timeout_ms: u64) {
        self.runner.set_tick_timeout(timeout_ms);
    }

    fn job(&self) -> Arc<Mutex<Job>> {
        self.runner.job()
    }
}

/// Creates one handler per submitted job.
#[async_trait]
pub trait JobHandlerFactory: Send + Sync {
    async fn create(
        &self,
        procedure: &Procedure,
        job: Arc<Mutex<Job>>,
        events_tx: mpsc::Sender<Event>,
    ) -> anyhow::Result<Box<dyn JobHandler>>;
}

/// Factory producing [`LocalJobHandler`] instances over a domain executor
/// factory.
pub struct LocalJobHandlerFactory {
    executors: Arc<dyn ExecutorFactory>,
    default_tick_timeout_ms: u64,
}

impl LocalJobHandlerFactory {
    pub fn new(executors: Arc<dyn ExecutorFactory>) -> Self {
        Self {
            executors,
            default_tick_timeout_ms: 0,
        }
    }

    /// Tick delay applied to every created handler.
    pub fn with_default_tick_timeout(mut self, timeout_ms: u64) -> Self {
        self.default_tick_timeout_ms = timeout_ms;
        self
    }
}

#[async_trait]
impl JobHandlerFactory for LocalJobHandlerFactory {
    async fn create(
        &self,
        procedure: &Procedure,
        job: Arc<Mutex<Job>>,
        events_tx: mpsc::Sender<Event>,
    ) -> anyhow::Result<Box<dyn JobHandler>> {
        let executor = self.executors.create(procedure)?;
        let handler =
            LocalJobHandler::new(procedure.clone(), executor, job, events_tx).await?;
        handler.set_tick_timeout(self.default_tick_timeout_ms);
        Ok(Box::new(handler))
    }
}
