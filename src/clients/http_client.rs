//! Network transport backed by `reqwest`.
//!
//! This module provides [`ReqwestTransport`], the production implementation of
//! [`Transport`]. Tasks execute on the ambient Tokio runtime when started.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;

use crate::clients::errors::TransportError;
use crate::clients::http_request::TransportRequest;
use crate::clients::transport::{
    Completion, CompletionSlot, Transport, TransportResult, TransportTask,
};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// [`Transport`] that sends requests over the network with `reqwest`.
///
/// Non-2xx responses are delivered as [`TransportError::Status`]; a 2xx
/// response with an empty body is delivered as `Ok(None)`. No retries or
/// redirects policy is layered on top of what the `reqwest::Client` does.
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync` and cheap to clone; clones share the
/// underlying connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use resource_loader::clients::ReqwestTransport;
///
/// let transport = ReqwestTransport::builder()
///     .user_agent_prefix("MyApp/1.0")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        Self::builder()
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Creates a builder for configuring the transport.
    #[must_use]
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Wraps an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Returns the default `User-Agent` value for the given prefix.
    #[must_use]
    pub fn user_agent(prefix: Option<&str>) -> String {
        prefix.map_or_else(
            || format!("resource-loader v{SDK_VERSION}"),
            |prefix| format!("{prefix} | resource-loader v{SDK_VERSION}"),
        )
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    fn submit(&self, request: TransportRequest, completion: Completion) -> Box<dyn TransportTask> {
        Box::new(ReqwestTask {
            client: self.client.clone(),
            request: Mutex::new(Some(request)),
            completion: Arc::new(CompletionSlot::new(completion)),
            cancel: Arc::new(Notify::new()),
        })
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug, Default)]
pub struct ReqwestTransportBuilder {
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ReqwestTransportBuilder {
    /// Sets a prefix prepended to the default `User-Agent`.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a per-request timeout enforced by the reqwest client.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the reqwest client cannot be created.
    pub fn build(self) -> Result<ReqwestTransport, TransportError> {
        let user_agent = ReqwestTransport::user_agent(self.user_agent_prefix.as_deref());
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(ReqwestTransport {
            client: builder.build()?,
        })
    }
}

struct ReqwestTask {
    client: reqwest::Client,
    request: Mutex<Option<TransportRequest>>,
    completion: Arc<CompletionSlot>,
    cancel: Arc<Notify>,
}

impl TransportTask for ReqwestTask {
    fn start(&self) {
        let Some(request) = self
            .request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return;
        };
        if self.completion.is_done() {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            self.completion.complete(Err(TransportError::NoRuntime));
            return;
        };

        let client = self.client.clone();
        let completion = Arc::clone(&self.completion);
        let cancel = Arc::clone(&self.cancel);
        runtime.spawn(async move {
            tokio::select! {
                result = execute(&client, request) => {
                    completion.complete(result);
                }
                () = cancel.notified() => {
                    tracing::debug!("In-flight request aborted after cancellation");
                }
            }
        });
    }

    fn cancel(&self) {
        self.completion.complete(Err(TransportError::Cancelled));
        // Stores a permit when nothing is waiting yet, so a later `notified()` still fires.
        self.cancel.notify_one();
    }
}

async fn execute(client: &reqwest::Client, request: TransportRequest) -> TransportResult {
    let TransportRequest {
        method,
        url,
        headers,
        body,
    } = request;

    let mut builder = client.request(method.into(), url.clone());
    if let Some(headers) = &headers {
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
    }
    if let Some(body) = body {
        builder = builder.body(body);
    }

    let response = builder.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        tracing::warn!(
            "Request {} {} failed with status {}",
            method,
            url,
            status.as_u16()
        );
        return Err(TransportError::Status {
            code: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    Ok(if bytes.is_empty() { None } else { Some(bytes) })
}
