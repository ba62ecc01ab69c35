//! The per-job worker loop and its control surface.
//!
//! One `JobRunner` drives one executor on one spawned worker task. The
//! worker repeatedly calls `execute_single` until it reports completion,
//! honoring the [`FlowController`] pacing and an optional fixed tick delay
//! between ticks. Status transitions are produced only from the worker
//! task, so observers see them strictly ordered.
//!
//! A stop request is cooperative: it halts the executor, marks the halt
//! flag and forces the flow controller to pass-through; the worker
//! observes all of that at the next tick boundary. `shutdown` additionally
//! awaits the worker task, so the executor is never released while a step
//! may still be running.

use crate::executor::ProcedureExecutor;
use crate::jobs::error::JobError;
use crate::jobs::flow::{FlowController, WaitingMode};
use crate::jobs::job::{
    complete_job, fail_job, halt_job, pause_job, record_tick, reset_job, resume_job, start_job,
    step_job,
};
use jk_protocol::ipc::Event;
use jk_protocol::job_models::{Job, RunnerStatus};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

struct WorkerContext {
    executor: Arc<dyn ProcedureExecutor>,
    flow: Arc<FlowController>,
    job: Arc<Mutex<Job>>,
    events_tx: mpsc::Sender<Event>,
    tick_timeout_ms: Arc<AtomicU64>,
    halt_requested: Arc<AtomicBool>,
}

/// Drives a [`ProcedureExecutor`] on a dedicated worker task.
pub struct JobRunner {
    executor: Arc<dyn ProcedureExecutor>,
    flow: Arc<FlowController>,
    job: Arc<Mutex<Job>>,
    events_tx: mpsc::Sender<Event>,
    tick_timeout_ms: Arc<AtomicU64>,
    halt_requested: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl JobRunner {
    pub fn new(
        executor: Arc<dyn ProcedureExecutor>,
        flow: Arc<FlowController>,
        job: Arc<Mutex<Job>>,
        events_tx: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            executor,
            flow,
            job,
            events_tx,
            tick_timeout_ms: Arc::new(AtomicU64::new(0)),
            halt_requested: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    /// Start the worker loop.
    ///
    /// Fails with [`JobError::AlreadyStarted`] unless the job is in its
    /// initial state; a job may not be started twice concurrently, and a
    /// finished job needs a [`JobRunner::reset`] first.
    pub async fn start_request(&self) -> Result<(), JobError> {
        {
            let job = self.job.lock().await;
            if job.status != RunnerStatus::Initial {
                return Err(JobError::AlreadyStarted { status: job.status });
            }
        }

        // a previous worker, if any, has already exited (status was Initial
        // again only after reset); reap its handle before spawning anew
        if let Some(handle) = self.worker.lock().await.take() {
            let _ = handle.await;
        }

        self.halt_requested.store(false, Ordering::SeqCst);

        // deliberately before the task starts, so callers observe Running
        // as soon as start_request returns
        {
            let mut job = self.job.lock().await;
            start_job(&mut job, &self.events_tx).await;
        }

        let context = WorkerContext {
            executor: Arc::clone(&self.executor),
            flow: Arc::clone(&self.flow),
            job: Arc::clone(&self.job),
            events_tx: self.events_tx.clone(),
            tick_timeout_ms: Arc::clone(&self.tick_timeout_ms),
            halt_requested: Arc::clone(&self.halt_requested),
        };
        let handle = tokio::spawn(run_loop(context));
        *self.worker.lock().await = Some(handle);
        Ok(())
    }

    /// Arm pause mode: the worker blocks at the next tick boundary.
    pub fn pause_mode_on_request(&self) {
        self.flow.set_waiting_mode(WaitingMode::WaitForRelease);
    }

    /// Disarm pause mode, releasing a blocked worker.
    pub fn pause_mode_off_request(&self) {
        self.flow.set_waiting_mode(WaitingMode::Proceed);
    }

    /// Release a paused worker for exactly one tick.
    pub fn step_request(&self) {
        self.flow.step_request();
    }

    /// Change the pacing mode directly (e.g. slow-run via `SleepFor`).
    pub fn set_waiting_mode(&self, mode: WaitingMode) {
        self.flow.set_waiting_mode(mode);
    }

    /// Request cooperative termination of the current run.
    ///
    /// Halts the executor (best-effort interrupt of the in-flight step)
    /// and forces the flow controller to pass-through; the worker observes
    /// the request at the next tick boundary and reports `Halted`. No-op
    /// when no worker is running.
    pub fn stop_request(&self) {
        self.halt_requested.store(true, Ordering::SeqCst);
        self.executor.halt();
        self.flow.set_waiting_mode(WaitingMode::Proceed);
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// Unlike [`JobRunner::stop_request`] this joins the worker task, so
    /// on return the executor is guaranteed to be idle. The flow
    /// controller is interrupted permanently; the runner needs a
    /// [`JobRunner::reset`] before it can run again.
    pub async fn shutdown(&self) {
        self.halt_requested.store(true, Ordering::SeqCst);
        self.executor.halt();
        self.flow.interrupt();
        if let Some(handle) = self.worker.lock().await.take() {
            let _ = handle.await;
        }
    }

    /// Return a finished job to its initial state.
    ///
    /// Only defined for finished jobs (`Succeeded`/`Failed`/`Halted`);
    /// resets the executor and the tick counter.
    pub async fn reset(&self) -> Result<(), JobError> {
        {
            let job = self.job.lock().await;
            if !job.status.is_finished() {
                return Err(JobError::ResetRequiresFinished { status: job.status });
            }
        }
        // terminal status means the worker exited; reap the handle
        if let Some(handle) = self.worker.lock().await.take() {
            let _ = handle.await;
        }

        self.executor.reset().await?;
        self.halt_requested.store(false, Ordering::SeqCst);

        let mut job = self.job.lock().await;
        reset_job(&mut job, &self.events_tx).await;
        Ok(())
    }

    /// Extra delay applied after every tick that still has work remaining.
    /// Zero disables the delay.
    pub fn set_tick_timeout(&self, timeout_ms: u64) {
        self.tick_timeout_ms.store(timeout_ms, Ordering::SeqCst);
    }

    /// Current runner status of the job.
    pub async fn get_status(&self) -> RunnerStatus {
        self.job.lock().await.status
    }

    /// True while the worker may still produce status changes.
    pub async fn is_busy(&self) -> bool {
        self.get_status().await.is_busy()
    }

    /// Shared job record backing this runner.
    pub fn job(&self) -> Arc<Mutex<Job>> {
        Arc::clone(&self.job)
    }

    /// Pacing controller of this runner.
    pub fn flow(&self) -> Arc<FlowController> {
        Arc::clone(&self.flow)
    }
}

async fn run_loop(context: WorkerContext) {
    loop {
        if context.halt_requested.load(Ordering::SeqCst) {
            let mut job = context.job.lock().await;
            halt_job(&mut job, &context.events_tx).await;
            return;
        }

        let more = match context.executor.execute_single().await {
            Ok(more) => more,
            Err(err) => {
                let mut job = context.job.lock().await;
                fail_job(&mut job, &context.events_tx, err.to_string()).await;
                return;
            }
        };

        {
            let mut job = context.job.lock().await;
            record_tick(&mut job);
        }

        if !more {
            let mut job = context.job.lock().await;
            if context.halt_requested.load(Ordering::SeqCst) {
                halt_job(&mut job, &context.events_tx).await;
            } else {
                complete_job(&mut job, &context.events_tx).await;
            }
            return;
        }

        if context.halt_requested.load(Ordering::SeqCst) {
            let mut job = context.job.lock().await;
            halt_job(&mut job, &context.events_tx).await;
            return;
        }

        let timeout_ms = context.tick_timeout_ms.load(Ordering::SeqCst);
        if timeout_ms > 0 {
            tokio::time::sleep(Duration::from_millis(timeout_ms)).await;
        }

        let was_paused = context.flow.is_paused();
        if was_paused {
            let mut job = context.job.lock().await;
            if job.status != RunnerStatus::Paused {
                pause_job(&mut job, &context.events_tx).await;
            }
        }

        context.flow.wait_if_necessary().await;

        if context.halt_requested.load(Ordering::SeqCst) {
            let mut job = context.job.lock().await;
            halt_job(&mut job, &context.events_tx).await;
            return;
        }

        if was_paused {
            let mut job = context.job.lock().await;
            if context.flow.is_paused() {
                // released by a step token, pause mode still armed
                step_job(&mut job, &context.events_tx).await;
            } else {
                resume_job(&mut job, &context.events_tx).await;
            }
        }
    }
}
