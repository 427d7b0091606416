//! The transport seam between the service and the network.
//!
//! A [`Transport`] accepts a [`TransportRequest`] together with a completion
//! callback and hands back a [`TransportTask`]. Nothing happens until the task
//! is started. The completion is invoked exactly once: with the response bytes
//! (or `None` when the response carried none), with a transport failure, or
//! with [`TransportError::Cancelled`] when the task is cancelled first.
//!
//! Two implementations ship with the crate:
//!
//! - [`ReqwestTransport`](crate::clients::ReqwestTransport) talks to the network
//! - [`FakeTransport`](crate::clients::FakeTransport) serves one-shot canned responses

use std::sync::{Mutex, PoisonError};

use bytes::Bytes;

use crate::clients::errors::TransportError;
use crate::clients::http_request::TransportRequest;

/// Outcome delivered to a transport completion.
pub type TransportResult = Result<Option<Bytes>, TransportError>;

/// Callback registered with a task at submission.
pub type Completion = Box<dyn FnOnce(TransportResult) + Send + 'static>;

/// Handle to one submitted request.
pub trait TransportTask: Send + Sync {
    /// Begins executing the request. Has no effect once the task has finished.
    fn start(&self);

    /// Cancels the request.
    ///
    /// If the completion has not run yet it runs with
    /// [`TransportError::Cancelled`]; otherwise this does nothing.
    fn cancel(&self);
}

/// Executes requests on behalf of a [`Service`](crate::rest::Service).
///
/// Implementations may invoke completions on any thread.
pub trait Transport: Send + Sync {
    /// Registers a request and its completion, returning an unstarted task.
    fn submit(&self, request: TransportRequest, completion: Completion) -> Box<dyn TransportTask>;
}

/// Holds a completion until it is taken, guaranteeing it runs at most once.
pub struct CompletionSlot(Mutex<Option<Completion>>);

impl CompletionSlot {
    pub const fn new(completion: Completion) -> Self {
        Self(Mutex::new(Some(completion)))
    }

    /// Runs the completion if it has not run yet. Returns whether it ran.
    pub fn complete(&self, result: TransportResult) -> bool {
        // The lock is released before the callback runs.
        let Some(completion) = self.take() else {
            return false;
        };
        completion(result);
        true
    }

    pub fn is_done(&self) -> bool {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn take(&self) -> Option<Completion> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}
