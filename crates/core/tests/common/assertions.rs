//! Custom assertion helpers and event collection for integration tests.

use jk_core::jobs::JobManager;
use jk_protocol::ipc::Event;
use jk_protocol::job_models::RunnerStatus;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use uuid::Uuid;

/// Poll the manager until the job reaches `status` or the timeout expires.
#[allow(dead_code)]
pub async fn wait_for_status(manager: &JobManager, job_id: Uuid, status: RunnerStatus) {
    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while std::time::Instant::now() < deadline {
        if manager.get_runner_status(job_id).await.ok() == Some(status) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!(
        "job {job_id} never reached {status:?}, last status {:?}",
        manager.get_runner_status(job_id).await
    );
}

/// Consume the event stream until the job reports a terminal status, then
/// keep draining briefly to catch anything emitted after it.
#[allow(dead_code)]
pub async fn collect_until_finished(rx: mpsc::Receiver<Event>, job_id: Uuid) -> Vec<Event> {
    let mut stream = ReceiverStream::new(rx);
    let mut events = Vec::new();

    loop {
        match tokio::time::timeout(Duration::from_secs(2), stream.next()).await {
            Ok(Some(event)) => {
                let finished = matches!(
                    &event,
                    Event::JobStatusChanged { job_id: id, status }
                        if *id == job_id && status.is_finished()
                );
                events.push(event);
                if finished {
                    break;
                }
            }
            _ => panic!("job {job_id} never reported a terminal status"),
        }
    }

    // anything emitted after the terminal status is a bug; give it a
    // moment to show up
    while let Ok(Some(event)) = tokio::time::timeout(Duration::from_millis(50), stream.next()).await
    {
        events.push(event);
    }
    events
}

/// The ordered status values reported for the given job.
#[allow(dead_code)]
pub fn status_sequence(events: &[Event], job_id: Uuid) -> Vec<RunnerStatus> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::JobStatusChanged { job_id: id, status } if *id == job_id => Some(*status),
            _ => None,
        })
        .collect()
}

/// Assert that a sequence of events contains a log event with the given
/// message fragment.
#[allow(dead_code)]
pub fn assert_has_log_containing(events: &[Event], fragment: &str) {
    assert!(
        events.iter().any(|event| matches!(
            event,
            Event::JobLog { event, .. } if event.message.contains(fragment)
        )),
        "no log event containing '{fragment}'"
    );
}
