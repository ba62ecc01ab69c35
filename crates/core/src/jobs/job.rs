//! Job state transitions.
//!
//! This module provides functions for managing the lifecycle of a Job,
//! including status transitions and event emission. Status values for a
//! given job are only ever written by its worker task (or, for the
//! initial/reset transitions, by the control surface while no worker
//! runs), which keeps transitions strictly ordered.

use jk_protocol::ipc::Event;
use jk_protocol::job_models::{Job, LogEvent, RunnerStatus, Severity};
use tokio::sync::mpsc::Sender;

async fn update_status(job: &mut Job, events_tx: &Sender<Event>, status: RunnerStatus) {
    job.status = status;
    let _ = events_tx
        .send(Event::JobStatusChanged {
            job_id: job.id,
            status,
        })
        .await;
}

/// Transition to Running and emit the event.
pub async fn start_job(job: &mut Job, events_tx: &Sender<Event>) {
    update_status(job, events_tx, RunnerStatus::Running).await;
}

/// Transition to Paused and emit the event.
///
/// Called by the worker when it reaches a tick boundary with pause mode
/// armed.
pub async fn pause_job(job: &mut Job, events_tx: &Sender<Event>) {
    update_status(job, events_tx, RunnerStatus::Paused).await;
}

/// Transition to Stepping and emit the event.
///
/// Called by the worker when a single tick was released while pause mode
/// stays armed.
pub async fn step_job(job: &mut Job, events_tx: &Sender<Event>) {
    update_status(job, events_tx, RunnerStatus::Stepping).await;
}

/// Transition back to Running after a pause and emit the event.
pub async fn resume_job(job: &mut Job, events_tx: &Sender<Event>) {
    update_status(job, events_tx, RunnerStatus::Running).await;
}

/// Mark the job as completed successfully and emit the event.
pub async fn complete_job(job: &mut Job, events_tx: &Sender<Event>) {
    update_status(job, events_tx, RunnerStatus::Succeeded).await;
}

/// Mark the job as failed, log the error and emit the events.
pub async fn fail_job(job: &mut Job, events_tx: &Sender<Event>, error: String) {
    update_status(job, events_tx, RunnerStatus::Failed).await;
    log_to_job(job, events_tx, Severity::Error, error).await;
}

/// Mark the job as halted by a stop request and emit the events.
pub async fn halt_job(job: &mut Job, events_tx: &Sender<Event>) {
    update_status(job, events_tx, RunnerStatus::Halted).await;
    log_to_job(job, events_tx, Severity::Warning, "Stop request".to_string()).await;
}

/// Return a finished job to its initial state and emit the event.
pub async fn reset_job(job: &mut Job, events_tx: &Sender<Event>) {
    job.tick_count = 0;
    update_status(job, events_tx, RunnerStatus::Initial).await;
}

/// Append a log event to the job log and emit it.
pub async fn log_to_job(
    job: &mut Job,
    events_tx: &Sender<Event>,
    severity: Severity,
    message: String,
) {
    let event = LogEvent::new(job.procedure_name.clone(), severity, message);
    job.log.push(event.clone());
    let _ = events_tx
        .send(Event::JobLog {
            job_id: job.id,
            event,
        })
        .await;
}

/// Count one executed tick.
pub fn record_tick(job: &mut Job) {
    job.tick_count += 1;
}
