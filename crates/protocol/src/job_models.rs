//! Runtime job state models.
//!
//! This module defines the structures for tracking the state of running
//! procedure executions.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Represents the current lifecycle status of a job's runner.
///
/// The status progresses through these states during normal execution:
/// Initial -> Running -> Succeeded
///
/// Special states:
/// - Paused: Worker is blocked between ticks, waiting for a release
/// - Stepping: Worker was released for exactly one tick while pause mode
///   is still armed
/// - Failed: A tick reported an error
/// - Halted: Execution was interrupted by a stop request
/// - Undefined: No domain executor has been attached yet
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunnerStatus {
    /// No executor is attached; the job is not runnable yet.
    Undefined,

    /// Executor attached, execution has not started.
    Initial,

    /// Job is actively executing ticks.
    Running,

    /// Worker is blocked between ticks, waiting for a step or a resume.
    Paused,

    /// Worker executes a single tick while pause mode stays armed.
    Stepping,

    /// Job has completed successfully.
    Succeeded,

    /// A tick reported an error.
    Failed,

    /// Execution was interrupted by a stop request.
    Halted,
}

impl RunnerStatus {
    /// True for the three terminal states.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            RunnerStatus::Succeeded | RunnerStatus::Failed | RunnerStatus::Halted
        )
    }

    /// True while a worker task may still produce status changes.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            RunnerStatus::Running | RunnerStatus::Paused | RunnerStatus::Stepping
        )
    }
}

/// Message severity attached to a [`LogEvent`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// A single append-only log record produced during job execution.
///
/// Log events are immutable once created; they are retained on the [`Job`]
/// record and additionally delivered live through the event channel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct LogEvent {
    /// Component that produced the message (e.g. the procedure name).
    pub source: String,

    /// Message severity.
    pub severity: Severity,

    /// Local calendar date of creation.
    pub date: NaiveDate,

    /// Local wall-clock time of creation.
    pub time: NaiveTime,

    /// The message text.
    pub message: String,
}

impl LogEvent {
    /// Create a log event stamped with the current local date and time.
    pub fn new(source: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        let now = chrono::Local::now();
        Self {
            source: source.into(),
            severity,
            date: now.date_naive(),
            time: now.time(),
            message: message.into(),
        }
    }
}

/// Represents the runtime state of a single submitted procedure.
///
/// Each time a procedure is submitted, a new Job instance is created with a
/// unique ID to track its execution state. The record outlives its runner:
/// removing a job handler keeps the Job data intact.
#[derive(Serialize, Deserialize, Debug, Clone, TS)]
pub struct Job {
    /// Unique identifier for this job.
    #[ts(type = "string")]
    pub id: Uuid,

    /// Name of the procedure being executed.
    pub procedure_name: String,

    /// Current runner status.
    pub status: RunnerStatus,

    /// Number of ticks executed so far in the current run.
    pub tick_count: u64,

    /// Accumulated log events from this job execution.
    pub log: Vec<LogEvent>,
}

impl Job {
    /// Create a new job record in the `Initial` state.
    pub fn new(procedure_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            procedure_name: procedure_name.into(),
            status: RunnerStatus::Initial,
            tick_count: 0,
            log: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job() {
        let job = Job::new("test-procedure");
        assert_eq!(job.procedure_name, "test-procedure");
        assert_eq!(job.status, RunnerStatus::Initial);
        assert_eq!(job.tick_count, 0);
        assert!(job.log.is_empty());
    }

    #[test]
    fn test_status_predicates() {
        assert!(RunnerStatus::Succeeded.is_finished());
        assert!(RunnerStatus::Failed.is_finished());
        assert!(RunnerStatus::Halted.is_finished());
        assert!(!RunnerStatus::Initial.is_finished());
        assert!(!RunnerStatus::Paused.is_finished());

        assert!(RunnerStatus::Running.is_busy());
        assert!(RunnerStatus::Paused.is_busy());
        assert!(RunnerStatus::Stepping.is_busy());
        assert!(!RunnerStatus::Initial.is_busy());
        assert!(!RunnerStatus::Succeeded.is_busy());
        assert!(!RunnerStatus::Undefined.is_busy());
    }

    #[test]
    fn test_log_event_creation() {
        let event = LogEvent::new("test-source", Severity::Info, "hello");
        assert_eq!(event.source, "test-source");
        assert_eq!(event.severity, Severity::Info);
        assert_eq!(event.message, "hello");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&RunnerStatus::Succeeded).expect("serializable");
        assert_eq!(json, "\"SUCCEEDED\"");
    }
}
