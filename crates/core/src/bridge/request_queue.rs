//! Generic one-answer-per-request bridge between two tasks.
//!
//! The requesting side calls [`RequestHandle::request`] and suspends until
//! the answering side replies. Each call carries its own single-use answer
//! slot, so overlapping requests from concurrent callers are paired with
//! their own answers and never see anyone else's.
//!
//! Shutdown is signalled by dropping either side: a dropped receiver makes
//! new requests fail with [`RequestError::QueueClosed`], and dropping an
//! unanswered [`Request`] resolves the blocked caller with
//! [`RequestError::Terminated`] instead of hanging it forever.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Failure modes of a blocking request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The answering side is gone; the request was never delivered.
    #[error("Request queue is closed")]
    QueueClosed,

    /// The request was delivered but abandoned before an answer arrived.
    #[error("Request was terminated before being answered")]
    Terminated,
}

/// A delivered request waiting for its answer.
///
/// Dropping it without calling [`Request::answer`] resolves the blocked
/// requester with [`RequestError::Terminated`].
pub struct Request<A, R> {
    /// The request payload.
    pub args: A,
    answer_slot: oneshot::Sender<R>,
}

impl<A, R> Request<A, R> {
    /// Deliver the answer. Returns false when the requester gave up
    /// in the meantime.
    pub fn answer(self, result: R) -> bool {
        self.answer_slot.send(result).is_ok()
    }
}

/// Requesting side of the bridge. Cheap to clone; any number of worker
/// tasks may hold one.
pub struct RequestHandle<A, R> {
    tx: mpsc::Sender<Request<A, R>>,
}

impl<A, R> Clone for RequestHandle<A, R> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A, R> RequestHandle<A, R> {
    /// Send the request and suspend until it is answered or abandoned.
    pub async fn request(&self, args: A) -> Result<R, RequestError> {
        let (answer_tx, answer_rx) = oneshot::channel();
        let request = Request {
            args,
            answer_slot: answer_tx,
        };
        self.tx
            .send(request)
            .await
            .map_err(|_| RequestError::QueueClosed)?;
        answer_rx.await.map_err(|_| RequestError::Terminated)
    }
}

/// Answering side of the bridge.
pub struct RequestReceiver<A, R> {
    rx: mpsc::Receiver<Request<A, R>>,
}

impl<A, R> RequestReceiver<A, R> {
    /// Receive the next pending request. `None` once every handle is gone.
    pub async fn recv(&mut self) -> Option<Request<A, R>> {
        self.rx.recv().await
    }

    /// Stop accepting requests. Requests already queued still come out of
    /// `recv`; new `request` calls fail with `QueueClosed`.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

/// Create a connected handle/receiver pair.
pub fn request_queue<A, R>(capacity: usize) -> (RequestHandle<A, R>, RequestReceiver<A, R>) {
    let (tx, rx) = mpsc::channel(capacity);
    (RequestHandle { tx }, RequestReceiver { rx })
}

/// Spawn an answering loop that feeds every request through `provider`.
///
/// The loop ends when every handle is dropped or the receiver is closed.
pub fn spawn_provider<A, R, F>(
    mut receiver: RequestReceiver<A, R>,
    mut provider: F,
) -> JoinHandle<()>
where
    A: Send + 'static,
    R: Send + 'static,
    F: FnMut(A) -> R + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(request) = receiver.recv().await {
            let Request { args, answer_slot } = request;
            let _ = answer_slot.send(provider(args));
        }
    })
}
