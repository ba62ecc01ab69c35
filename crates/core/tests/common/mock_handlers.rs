//! Mock job handlers for call-sequence verification.

#![allow(dead_code)]

use async_trait::async_trait;
use jk_core::jobs::{JobError, JobHandler, JobHandlerFactory};
use jk_protocol::ipc::Event;
use jk_protocol::job_models::{Job, RunnerStatus};
use jk_protocol::procedure_models::Procedure;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{mpsc, Mutex};

/// Shared recording of handler calls, in invocation order.
pub type CallLog = Arc<StdMutex<Vec<&'static str>>>;

fn push(calls: &CallLog, name: &'static str) {
    calls
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(name);
}

/// A handler that records every control call and tracks status without
/// running anything.
pub struct RecordingJobHandler {
    calls: CallLog,
    status: StdMutex<RunnerStatus>,
    job: Arc<Mutex<Job>>,
}

impl RecordingJobHandler {
    pub fn new(initial_status: RunnerStatus, calls: CallLog, job: Arc<Mutex<Job>>) -> Self {
        Self {
            calls,
            status: StdMutex::new(initial_status),
            job,
        }
    }

    fn set_status(&self, status: RunnerStatus) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
    }
}

#[async_trait]
impl JobHandler for RecordingJobHandler {
    async fn start(&self) -> Result<(), JobError> {
        push(&self.calls, "start");
        self.set_status(RunnerStatus::Running);
        Ok(())
    }

    async fn pause(&self) {
        push(&self.calls, "pause");
    }

    async fn step(&self) -> Result<(), JobError> {
        push(&self.calls, "step");
        Ok(())
    }

    async fn stop(&self) {
        push(&self.calls, "stop");
        self.set_status(RunnerStatus::Halted);
    }

    async fn reset(&self) -> Result<(), JobError> {
        push(&self.calls, "reset");
        self.set_status(RunnerStatus::Initial);
        Ok(())
    }

    async fn shutdown(&self) {
        push(&self.calls, "shutdown");
    }

    async fn get_runner_status(&self) -> RunnerStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn is_running(&self) -> bool {
        self.get_runner_status().await.is_busy()
    }

    fn set_tick_timeout(&self, _timeout_ms: u64) {
        push(&self.calls, "set_tick_timeout");
    }

    fn job(&self) -> Arc<Mutex<Job>> {
        Arc::clone(&self.job)
    }
}

/// Factory handing out [`RecordingJobHandler`]s that share one call log
/// and start in a fixed status.
pub struct RecordingHandlerFactory {
    pub calls: CallLog,
    pub initial_status: RunnerStatus,
}

impl RecordingHandlerFactory {
    pub fn new(initial_status: RunnerStatus) -> Self {
        Self {
            calls: Arc::new(StdMutex::new(Vec::new())),
            initial_status,
        }
    }

    pub fn recorded_calls(&self) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl JobHandlerFactory for RecordingHandlerFactory {
    async fn create(
        &self,
        _procedure: &Procedure,
        job: Arc<Mutex<Job>>,
        _events_tx: mpsc::Sender<Event>,
    ) -> anyhow::Result<Box<dyn JobHandler>> {
        Ok(Box::new(RecordingJobHandler::new(
            self.initial_status,
            Arc::clone(&self.calls),
            job,
        )))
    }
}
