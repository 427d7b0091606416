//! In-memory transport that serves one-shot canned responses.
//!
//! [`FakeTransport`] keys responses by the exact destination URL string. When
//! a task starts, a registered response is removed and delivered, and the
//! outgoing request is recorded so tests can inspect its headers and body. A
//! destination with nothing registered yields [`TransportError::Unexpected`].
//!
//! Completions run synchronously inside [`TransportTask::start`] and
//! [`TransportTask::cancel`].
//!
//! # Example
//!
//! ```rust
//! use resource_loader::clients::FakeTransport;
//! use serde_json::json;
//!
//! let transport = FakeTransport::new();
//! transport.register("http://example.org/api/v1/examples", json!([{"id": "0"}]));
//! assert_eq!(transport.pending_count(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use serde_json::Value;

use crate::clients::errors::TransportError;
use crate::clients::http_request::TransportRequest;
use crate::clients::transport::{Completion, CompletionSlot, Transport, TransportTask};

#[derive(Clone, Debug)]
enum Canned {
    Json(Value),
    Raw(Bytes),
    Empty,
}

impl Canned {
    fn into_bytes(self) -> Option<Bytes> {
        match self {
            Self::Json(value) => Some(Bytes::from(value.to_string())),
            Self::Raw(bytes) => Some(bytes),
            Self::Empty => None,
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    responses: HashMap<String, Canned>,
    recorded: Vec<TransportRequest>,
}

/// A [`Transport`] test double with one-shot canned responses.
///
/// Clones share the same registry and recordings, so a test can keep one
/// clone while a [`Service`](crate::rest::Service) owns another.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    /// Creates a transport with nothing registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a JSON value to be served once for `url`.
    ///
    /// A later registration for the same URL replaces an unconsumed one.
    pub fn register(&self, url: impl Into<String>, value: Value) {
        self.insert(url.into(), Canned::Json(value));
    }

    /// Registers raw bytes to be served once for `url`, bypassing JSON encoding.
    pub fn register_bytes(&self, url: impl Into<String>, bytes: impl Into<Bytes>) {
        self.insert(url.into(), Canned::Raw(bytes.into()));
    }

    /// Registers a response that carries no bytes and no error for `url`.
    pub fn register_empty(&self, url: impl Into<String>) {
        self.insert(url.into(), Canned::Empty);
    }

    /// Returns the number of registered responses not yet consumed.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.lock().responses.len()
    }

    /// Returns every request that was answered with a canned response, oldest first.
    #[must_use]
    pub fn recorded_requests(&self) -> Vec<TransportRequest> {
        self.lock().recorded.clone()
    }

    /// Returns the most recently answered request.
    #[must_use]
    pub fn last_request(&self) -> Option<TransportRequest> {
        self.lock().recorded.last().cloned()
    }

    fn insert(&self, url: String, canned: Canned) {
        self.lock().responses.insert(url, canned);
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for FakeTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("FakeTransport")
            .field("pending", &state.responses.len())
            .field("recorded", &state.recorded.len())
            .finish()
    }
}

impl Transport for FakeTransport {
    fn submit(&self, request: TransportRequest, completion: Completion) -> Box<dyn TransportTask> {
        Box::new(FakeTask {
            transport: self.clone(),
            request: Mutex::new(Some(request)),
            completion: CompletionSlot::new(completion),
        })
    }
}

struct FakeTask {
    transport: FakeTransport,
    request: Mutex<Option<TransportRequest>>,
    completion: CompletionSlot,
}

impl TransportTask for FakeTask {
    fn start(&self) {
        if self.completion.is_done() {
            return;
        }
        let Some(request) = self
            .request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return;
        };

        let url = request.url.as_str().to_string();
        let Some(canned) = self.transport.lock().responses.remove(&url) else {
            self.completion
                .complete(Err(TransportError::Unexpected { url }));
            return;
        };
        self.transport.lock().recorded.push(request);

        self.completion.complete(Ok(canned.into_bytes()));
    }

    fn cancel(&self) {
        self.completion.complete(Err(TransportError::Cancelled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpMethod, TransportResult};
    use reqwest::Url;
    use serde_json::json;
    use std::sync::mpsc;

    const URL: &str = "http://example.org/api/v1/examples";

    fn submit(
        transport: &FakeTransport,
        url: &str,
    ) -> (Box<dyn TransportTask>, mpsc::Receiver<TransportResult>) {
        let (tx, rx) = mpsc::channel();
        let request = TransportRequest::new(HttpMethod::Get, Url::parse(url).unwrap());
        let task = transport.submit(
            request,
            Box::new(move |result| {
                tx.send(result).unwrap();
            }),
        );
        (task, rx)
    }

    #[test]
    fn test_registered_response_is_served_as_json_bytes() {
        let transport = FakeTransport::new();
        transport.register(URL, json!({"id": "0", "title": "first"}));

        let (task, rx) = submit(&transport, URL);
        task.start();

        let bytes = rx.recv().unwrap().unwrap().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"id": "0", "title": "first"}));
    }

    #[test]
    fn test_nothing_happens_until_started() {
        let transport = FakeTransport::new();
        transport.register(URL, json!([]));

        let (_task, rx) = submit(&transport, URL);

        assert!(rx.try_recv().is_err());
        assert_eq!(transport.pending_count(), 1);
    }

    #[test]
    fn test_responses_are_one_shot() {
        let transport = FakeTransport::new();
        transport.register(URL, json!([]));

        let (first, first_rx) = submit(&transport, URL);
        first.start();
        assert!(first_rx.recv().unwrap().is_ok());
        assert_eq!(transport.pending_count(), 0);

        let (second, second_rx) = submit(&transport, URL);
        second.start();
        assert!(matches!(
            second_rx.recv().unwrap(),
            Err(TransportError::Unexpected { url }) if url == URL
        ));
    }

    #[test]
    fn test_destination_must_match_exactly() {
        let transport = FakeTransport::new();
        transport.register(URL, json!([]));

        let (task, rx) = submit(&transport, "http://example.org/api/v1/examples/");
        task.start();

        assert!(matches!(
            rx.recv().unwrap(),
            Err(TransportError::Unexpected { .. })
        ));
        assert_eq!(transport.pending_count(), 1);
        assert!(transport.recorded_requests().is_empty());
    }

    #[test]
    fn test_cancel_delivers_cancelled_even_when_registered() {
        let transport = FakeTransport::new();
        transport.register(URL, json!([]));

        let (task, rx) = submit(&transport, URL);
        task.cancel();

        assert!(matches!(rx.recv().unwrap(), Err(TransportError::Cancelled)));
        assert_eq!(transport.pending_count(), 1);
    }

    #[test]
    fn test_cancel_delivers_cancelled_when_unregistered() {
        let transport = FakeTransport::new();

        let (task, rx) = submit(&transport, URL);
        task.cancel();

        assert!(matches!(rx.recv().unwrap(), Err(TransportError::Cancelled)));
    }

    #[test]
    fn test_start_after_cancel_is_ignored() {
        let transport = FakeTransport::new();
        transport.register(URL, json!([]));

        let (task, rx) = submit(&transport, URL);
        task.cancel();
        task.start();

        assert!(matches!(rx.recv().unwrap(), Err(TransportError::Cancelled)));
        assert!(rx.try_recv().is_err());
        assert_eq!(transport.pending_count(), 1);
    }

    #[test]
    fn test_cancel_after_completion_is_ignored() {
        let transport = FakeTransport::new();
        transport.register(URL, json!([]));

        let (task, rx) = submit(&transport, URL);
        task.start();
        task.cancel();

        assert!(rx.recv().unwrap().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_empty_registration_delivers_no_bytes() {
        let transport = FakeTransport::new();
        transport.register_empty(URL);

        let (task, rx) = submit(&transport, URL);
        task.start();

        assert!(matches!(rx.recv().unwrap(), Ok(None)));
    }

    #[test]
    fn test_raw_bytes_are_served_verbatim() {
        let transport = FakeTransport::new();
        transport.register_bytes(URL, Bytes::from_static(b"not json"));

        let (task, rx) = submit(&transport, URL);
        task.start();

        let bytes = rx.recv().unwrap().unwrap().unwrap();
        assert_eq!(&bytes[..], b"not json");
    }

    #[test]
    fn test_answered_requests_are_recorded() {
        let transport = FakeTransport::new();
        transport.register(URL, json!([]));

        let (task, _rx) = submit(&transport, URL);
        task.start();

        let recorded = transport.last_request().unwrap();
        assert_eq!(recorded.url.as_str(), URL);
        assert_eq!(recorded.method, HttpMethod::Get);
        assert_eq!(transport.recorded_requests().len(), 1);
    }
}
