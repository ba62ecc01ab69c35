//! Communication protocol between the interaction layer and the Core.
//!
//! This module defines the message types for asynchronous communication
//! between the UI (interaction thread) and the Core (job execution logic).
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from UI to Core
//! - `Event`: Status updates sent from Core to UI
//!
//! Communication is asynchronous and channel-based: the UI never blocks on
//! a job's worker, and all worker-side notifications are queued so the UI
//! stays responsive.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::job_models::{LogEvent, RunnerStatus};

/// Operations sent from the UI to the Core logic.
///
/// These represent user commands and requests for information.
/// The core processes these operations and responds with Events.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "startJob",
///   "payload": {
///     "job_id": "uuid-here"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Submit a procedure for execution.
    ///
    /// Creates a job and its handler but does not start execution.
    SubmitProcedure {
        /// Name of a procedure from `.job-kit/procedures/*.yaml`.
        name: String,
    },

    /// Start (or restart, for a finished job) a submitted job.
    StartJob {
        #[ts(type = "string")]
        job_id: Uuid,
    },

    /// Arm pause mode: the job's worker blocks at the next tick boundary.
    PauseJob {
        #[ts(type = "string")]
        job_id: Uuid,
    },

    /// Release a paused job for exactly one tick.
    StepJob {
        #[ts(type = "string")]
        job_id: Uuid,
    },

    /// Stop a running job. The worker observes the request at the next
    /// tick boundary.
    StopJob {
        #[ts(type = "string")]
        job_id: Uuid,
    },

    /// Return a finished job to its initial state.
    ResetJob {
        #[ts(type = "string")]
        job_id: Uuid,
    },

    /// Remove a job's handler. The job record stays available.
    RemoveJob {
        #[ts(type = "string")]
        job_id: Uuid,
    },

    /// Select the single job whose live status/log the UI surfaces.
    SetActiveJob {
        #[ts(type = "string")]
        job_id: Uuid,
    },

    /// Change the per-tick delay of a job's worker.
    SetTickTimeout {
        #[ts(type = "string")]
        job_id: Uuid,
        timeout_ms: u64,
    },

    /// Stop every job.
    StopAllJobs,

    /// Shut down the application gracefully.
    Shutdown,
}

/// Events sent from the Core logic to the UI.
///
/// These represent state changes and status updates that the UI should
/// reflect to the user. Events for a given job are delivered in the order
/// they were produced.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A new job has been submitted.
    JobSubmitted {
        #[ts(type = "string")]
        job_id: Uuid,
        procedure_name: String,
    },

    /// A job's runner status has changed.
    JobStatusChanged {
        #[ts(type = "string")]
        job_id: Uuid,
        status: RunnerStatus,
    },

    /// A job has produced a new log event.
    ///
    /// The UI should append this to the job's log view.
    JobLog {
        #[ts(type = "string")]
        job_id: Uuid,
        event: LogEvent,
    },

    /// A job's handler was removed.
    JobRemoved {
        #[ts(type = "string")]
        job_id: Uuid,
    },

    /// The active job changed.
    ActiveJobChanged {
        #[ts(type = "string")]
        job_id: Uuid,
    },
}
