//! Job manager: owns all submitted jobs and mediates control requests.
//!
//! UI callers never need to reason about a job's exact current status: the
//! manager absorbs the one documented special case (starting or stepping a
//! finished job resets it first) and forwards everything else. The job
//! collection is owned by the interaction side; worker tasks only ever
//! touch the shared job records.

use crate::jobs::error::JobError;
use crate::jobs::handler::{JobHandler, JobHandlerFactory};
use jk_protocol::ipc::Event;
use jk_protocol::job_models::{Job, RunnerStatus};
use jk_protocol::procedure_models::Procedure;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::warn;
use uuid::Uuid;

/// True when a job must be returned to its initial state before it can be
/// started or stepped again.
fn is_reset_required(status: RunnerStatus) -> bool {
    status.is_finished()
}

/// Manages all submitted jobs.
///
/// The manager provides a centralized interface for:
/// - Submitting procedures and creating their handlers
/// - Starting, pausing, stepping, stopping and resetting jobs
/// - Removing handlers while keeping job records
/// - Tracking the single active job the UI surfaces
pub struct JobManager {
    /// Job records, kept even after their handler is removed.
    jobs: HashMap<Uuid, Arc<Mutex<Job>>>,

    /// One handler per submitted job still under management.
    handlers: HashMap<Uuid, Box<dyn JobHandler>>,

    /// Creates a handler for each submitted procedure.
    factory: Arc<dyn JobHandlerFactory>,

    /// Channel for sending events to the UI.
    events_tx: mpsc::Sender<Event>,

    /// The job whose live status/log the UI currently surfaces.
    active_job: Option<Uuid>,
}

impl JobManager {
    pub fn new(factory: Arc<dyn JobHandlerFactory>, events_tx: mpsc::Sender<Event>) -> Self {
        Self {
            jobs: HashMap::new(),
            handlers: HashMap::new(),
            factory,
            events_tx,
            active_job: None,
        }
    }

    /// Create a job and its handler for the given procedure.
    ///
    /// Does not start execution. Returns the new job's id.
    pub async fn submit_job(&mut self, procedure: Procedure) -> anyhow::Result<Uuid> {
        let job = Arc::new(Mutex::new(Job::new(procedure.name.clone())));
        let job_id = job.lock().await.id;

        let handler = self
            .factory
            .create(&procedure, Arc::clone(&job), self.events_tx.clone())
            .await?;

        self.jobs.insert(job_id, job);
        self.handlers.insert(job_id, handler);

        let _ = self
            .events_tx
            .send(Event::JobSubmitted {
                job_id,
                procedure_name: procedure.name,
            })
            .await;
        Ok(job_id)
    }

    fn handler(&self, job_id: Uuid) -> Result<&dyn JobHandler, JobError> {
        self.handlers
            .get(&job_id)
            .map(Box::as_ref)
            .ok_or(JobError::UnknownJob(job_id))
    }

    /// Start a job; a finished job is reset first, so starting it behaves
    /// as "restart from scratch".
    ///
    /// The reset and the start happen in this same synchronous call; no
    /// other status change can slip in between them from the manager's
    /// perspective.
    pub async fn start(&self, job_id: Uuid) -> Result<(), JobError> {
        let handler = self.handler(job_id)?;
        if is_reset_required(handler.get_runner_status().await) {
            handler.reset().await?;
        }
        handler.start().await
    }

    /// Step a job; same reset-first policy as [`JobManager::start`].
    pub async fn step(&self, job_id: Uuid) -> Result<(), JobError> {
        let handler = self.handler(job_id)?;
        if is_reset_required(handler.get_runner_status().await) {
            handler.reset().await?;
        }
        handler.step().await
    }

    /// Arm pause mode on a job. Pausing a non-running job is a no-op at
    /// the runner level.
    pub async fn pause(&self, job_id: Uuid) -> Result<(), JobError> {
        self.handler(job_id)?.pause().await;
        Ok(())
    }

    /// Request cooperative termination of a job.
    pub async fn stop(&self, job_id: Uuid) -> Result<(), JobError> {
        self.handler(job_id)?.stop().await;
        Ok(())
    }

    /// Return a finished job to its initial state.
    pub async fn reset(&self, job_id: Uuid) -> Result<(), JobError> {
        self.handler(job_id)?.reset().await
    }

    /// Remove a job's handler, leaving the job record intact.
    ///
    /// Fails while the job is running.
    pub async fn remove_job_handler(&mut self, job_id: Uuid) -> Result<(), JobError> {
        let handler = self.handler(job_id)?;
        if handler.is_running().await {
            return Err(JobError::JobIsRunning(job_id));
        }
        handler.shutdown().await;
        self.handlers.remove(&job_id);
        if self.active_job == Some(job_id) {
            self.active_job = None;
        }

        let _ = self.events_tx.send(Event::JobRemoved { job_id }).await;
        Ok(())
    }

    /// Select the single job whose live status/log the UI surfaces.
    pub async fn set_active_job(&mut self, job_id: Uuid) -> Result<(), JobError> {
        if !self.jobs.contains_key(&job_id) {
            return Err(JobError::UnknownJob(job_id));
        }
        if self.active_job == Some(job_id) {
            return Ok(());
        }
        self.active_job = Some(job_id);
        let _ = self.events_tx.send(Event::ActiveJobChanged { job_id }).await;
        Ok(())
    }

    /// The currently active job, if any.
    pub fn get_active_job(&self) -> Option<Uuid> {
        self.active_job
    }

    /// True while any job's worker may still produce status changes.
    pub async fn has_running_jobs(&self) -> bool {
        for handler in self.handlers.values() {
            if handler.is_running().await {
                return true;
            }
        }
        false
    }

    /// Request cooperative termination of every job.
    pub async fn stop_all_jobs(&self) {
        for handler in self.handlers.values() {
            handler.stop().await;
        }
    }

    /// Stop every job and join their workers. Used on application exit.
    pub async fn shutdown(&mut self) {
        for handler in self.handlers.values() {
            handler.shutdown().await;
        }
    }

    /// Current snapshot of a job record.
    pub async fn get_job(&self, job_id: Uuid) -> Option<Job> {
        match self.jobs.get(&job_id) {
            Some(job) => Some(job.lock().await.clone()),
            None => None,
        }
    }

    /// Current runner status of a job, `Undefined` once its handler is
    /// gone.
    pub async fn get_runner_status(&self, job_id: Uuid) -> Result<RunnerStatus, JobError> {
        match self.handlers.get(&job_id) {
            Some(handler) => Ok(handler.get_runner_status().await),
            None => {
                if self.jobs.contains_key(&job_id) {
                    Ok(RunnerStatus::Undefined)
                } else {
                    Err(JobError::UnknownJob(job_id))
                }
            }
        }
    }

    /// Change the per-tick delay of a job's worker.
    pub fn set_tick_timeout(&self, job_id: Uuid, timeout_ms: u64) -> Result<(), JobError> {
        match self.handlers.get(&job_id) {
            Some(handler) => {
                handler.set_tick_timeout(timeout_ms);
                Ok(())
            }
            None => {
                warn!(%job_id, "tick timeout change for a job without handler");
                Err(JobError::UnknownJob(job_id))
            }
        }
    }

    /// Number of jobs under management (handlers, not bare records).
    pub fn job_count(&self) -> usize {
        self.handlers.len()
    }
}
