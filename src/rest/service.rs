//! The request orchestrator.
//!
//! A [`Service`] combines a base URL, default headers, and a [`Transport`].
//! For each load it resolves the destination, packages the body, merges the
//! headers, submits the request, classifies the transport outcome, and runs
//! the descriptor's parse step on the returned bytes.

use std::fmt;

use reqwest::Url;
use serde::Serialize;
use tokio::sync::oneshot;

use crate::clients::{ReqwestTransport, Transport, TransportRequest, TransportResult, TransportTask};
use crate::config::{BaseUrl, ServiceConfig};
use crate::error::ConfigError;
use crate::rest::{
    merge_headers, Descriptor, Headers, Resource, ResourceCollection, ResourceError, Shape,
};

/// Loads [`Resource`]s and [`ResourceCollection`]s through a transport.
///
/// # Default Headers
///
/// Default headers apply to every load issued after they are set. Changing
/// them requires `&mut self`, so they cannot change underneath loads that are
/// still borrowing the service; each load takes its own snapshot when it is
/// dispatched. To use different defaults concurrently, use separate services.
///
/// # Thread Safety
///
/// `Service` is `Send + Sync` whenever its transport is. Completions run on
/// whatever thread the transport chooses and the service adds no
/// synchronization of its own.
///
/// # Example
///
/// ```rust
/// use resource_loader::clients::FakeTransport;
/// use resource_loader::rest::{ResourceCollection, Service};
/// use resource_loader::BaseUrl;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize)]
/// struct Example {
///     id: String,
///     title: String,
/// }
///
/// let transport = FakeTransport::new();
/// transport.register(
///     "http://example.org/api/v1/examples",
///     json!([{"id": "0", "title": "first"}]),
/// );
///
/// let service = Service::new(BaseUrl::new("http://example.org/api/v1/").unwrap(), transport);
/// let examples = ResourceCollection::<Example>::from_model("examples");
///
/// service.load_collection(&examples, None, |result| {
///     assert_eq!(result.unwrap()[0].title, "first");
/// });
/// ```
#[derive(Debug)]
pub struct Service<Tr = ReqwestTransport> {
    base_url: BaseUrl,
    default_headers: Option<Headers>,
    transport: Tr,
}

// Verify Service is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Service>();
};

impl Service<ReqwestTransport> {
    /// Creates a service that talks to the network with a default
    /// [`ReqwestTransport`].
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be created; see
    /// [`ReqwestTransport::new`].
    #[must_use]
    pub fn with_reqwest(base_url: BaseUrl) -> Self {
        Self::new(base_url, ReqwestTransport::new())
    }
}

impl<Tr: Transport> Service<Tr> {
    /// Creates a service with no default headers.
    #[must_use]
    pub const fn new(base_url: BaseUrl, transport: Tr) -> Self {
        Self {
            base_url,
            default_headers: None,
            transport,
        }
    }

    /// Creates a service from a [`ServiceConfig`].
    #[must_use]
    pub fn from_config(config: ServiceConfig, transport: Tr) -> Self {
        let (base_url, default_headers) = config.into_parts();
        Self {
            base_url,
            default_headers,
            transport,
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the current default headers, if any.
    #[must_use]
    pub const fn default_headers(&self) -> Option<&Headers> {
        self.default_headers.as_ref()
    }

    /// Replaces the default headers for all subsequent loads.
    pub fn set_default_headers(&mut self, headers: Option<Headers>) {
        self.default_headers = headers;
    }

    /// Returns the default headers for editing, creating an empty map if
    /// there were none.
    pub fn default_headers_mut(&mut self) -> &mut Headers {
        self.default_headers.get_or_insert_with(Headers::new)
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &Tr {
        &self.transport
    }

    /// Resolves `path` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if the combination is malformed.
    pub fn resolve(&self, path: &str) -> Result<Url, ConfigError> {
        self.base_url.join(path)
    }

    /// Loads a single resource, delivering the outcome to `completion`.
    ///
    /// If the payload cannot be serialized, `completion` runs before this
    /// method returns and no request is submitted.
    ///
    /// # Panics
    ///
    /// Panics if the resource's path cannot be resolved against the base URL.
    /// Paths are fixed by the caller, so this is a programming error. The
    /// path is checked before the payload is serialized.
    pub fn load<T, B, F>(
        &self,
        resource: &Resource<T, B>,
        headers: Option<&Headers>,
        completion: F,
    ) -> LoadHandle
    where
        T: Send + 'static,
        B: Serialize,
        F: FnOnce(Result<T, ResourceError>) + Send + 'static,
    {
        self.dispatch(resource, headers, completion)
    }

    /// Loads a collection, delivering the outcome to `completion`.
    ///
    /// # Panics
    ///
    /// Panics if the collection's path cannot be resolved against the base URL.
    pub fn load_collection<T, B, F>(
        &self,
        collection: &ResourceCollection<T, B>,
        headers: Option<&Headers>,
        completion: F,
    ) -> LoadHandle
    where
        T: Send + 'static,
        B: Serialize,
        F: FnOnce(Result<Vec<T>, ResourceError>) + Send + 'static,
    {
        self.dispatch(collection, headers, completion)
    }

    /// Loads a single resource and waits for the outcome.
    ///
    /// # Cancellation
    ///
    /// Dropping the returned future before it completes cancels the load, the
    /// same as [`LoadHandle::cancel`].
    ///
    /// # Errors
    ///
    /// Returns the [`ResourceError`] the load completed with. A transport that
    /// drops its completion without calling it is reported as
    /// [`ResourceError::Cancelled`].
    ///
    /// # Panics
    ///
    /// Panics if the resource's path cannot be resolved against the base URL.
    pub async fn fetch<T, B>(
        &self,
        resource: &Resource<T, B>,
        headers: Option<&Headers>,
    ) -> Result<T, ResourceError>
    where
        T: Send + 'static,
        B: Serialize + Sync,
    {
        let (tx, rx) = oneshot::channel();
        let handle = self.load(resource, headers, move |result| {
            let _ = tx.send(result);
        });
        let _guard = CancelOnDrop(handle);
        rx.await.unwrap_or(Err(ResourceError::Cancelled))
    }

    /// Loads a collection and waits for the outcome.
    ///
    /// Dropping the returned future cancels the load.
    ///
    /// # Errors
    ///
    /// Returns the [`ResourceError`] the load completed with.
    ///
    /// # Panics
    ///
    /// Panics if the collection's path cannot be resolved against the base URL.
    pub async fn fetch_collection<T, B>(
        &self,
        collection: &ResourceCollection<T, B>,
        headers: Option<&Headers>,
    ) -> Result<Vec<T>, ResourceError>
    where
        T: Send + 'static,
        B: Serialize + Sync,
    {
        let (tx, rx) = oneshot::channel();
        let handle = self.load_collection(collection, headers, move |result| {
            let _ = tx.send(result);
        });
        let _guard = CancelOnDrop(handle);
        rx.await.unwrap_or(Err(ResourceError::Cancelled))
    }

    fn dispatch<T, B, S, F>(
        &self,
        descriptor: &Descriptor<T, B, S>,
        headers: Option<&Headers>,
        completion: F,
    ) -> LoadHandle
    where
        T: Send + 'static,
        B: Serialize,
        S: Shape,
        F: FnOnce(Result<S::Output<T>, ResourceError>) + Send + 'static,
    {
        let method = descriptor.method();
        let url = self
            .resolve(descriptor.path())
            .unwrap_or_else(|error| panic!("{error}"));

        let body = match descriptor.package() {
            Ok(body) => body,
            Err(error) => {
                tracing::debug!("Not sending {} {}: {}", method, url, error);
                completion(Err(error));
                return LoadHandle::finished();
            }
        };

        let headers = merge_headers(self.default_headers.as_ref(), headers, body.is_some());
        tracing::debug!("Dispatching {} {}", method, url);

        let request = TransportRequest {
            method,
            url,
            headers,
            body,
        };
        let decode = descriptor.decoder();
        let task = self.transport.submit(
            request,
            Box::new(move |outcome: TransportResult| {
                let result = match outcome {
                    Ok(Some(bytes)) => S::parse(&bytes, &decode),
                    Ok(None) => Err(ResourceError::EmptyResult),
                    Err(error) => Err(ResourceError::from(error)),
                };
                if let Err(error) = &result {
                    tracing::debug!("Load finished with error: {}", error);
                }
                completion(result);
            }),
        );
        task.start();

        LoadHandle { task: Some(task) }
    }
}

/// Handle to an in-flight load.
///
/// Dropping the handle does not cancel the load.
pub struct LoadHandle {
    task: Option<Box<dyn TransportTask>>,
}

impl LoadHandle {
    const fn finished() -> Self {
        Self { task: None }
    }

    /// Cancels the load. The completion receives [`ResourceError::Cancelled`]
    /// unless it has already run.
    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            task.cancel();
        }
    }

    /// Returns `false` when the load completed before reaching the transport
    /// (the payload could not be serialized).
    #[must_use]
    pub const fn was_submitted(&self) -> bool {
        self.task.is_some()
    }
}

impl fmt::Debug for LoadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadHandle")
            .field("submitted", &self.was_submitted())
            .finish()
    }
}

/// Cancels the wrapped load when dropped. Cancelling a finished load is a no-op.
struct CancelOnDrop(LoadHandle);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}
