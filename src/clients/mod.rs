//! Transport layer: request types, the transport seam, and its implementations.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`] / [`TransportTask`]: the injectable seam the service submits requests to
//! - [`TransportRequest`]: a fully-resolved request (method, URL, headers, body)
//! - [`HttpMethod`]: supported HTTP methods and their protocol tokens
//! - [`ReqwestTransport`]: production transport over `reqwest`
//! - [`FakeTransport`]: one-shot canned-response transport for tests
//! - [`TransportError`]: failures a transport delivers instead of bytes
//!
//! # Example
//!
//! ```rust
//! use resource_loader::clients::{FakeTransport, HttpMethod, Transport, TransportRequest};
//! use reqwest::Url;
//! use serde_json::json;
//!
//! let transport = FakeTransport::new();
//! transport.register("http://example.org/api/v1/examples", json!([]));
//!
//! let request = TransportRequest::new(
//!     HttpMethod::Get,
//!     Url::parse("http://example.org/api/v1/examples").unwrap(),
//! );
//! let task = transport.submit(request, Box::new(|result| assert!(result.is_ok())));
//! task.start();
//! ```

mod errors;
mod fake;
mod http_client;
mod http_request;
mod transport;

pub use errors::{InvalidHttpMethodError, TransportError};
pub use fake::FakeTransport;
pub use http_client::{ReqwestTransport, ReqwestTransportBuilder, SDK_VERSION};
pub use http_request::{HttpMethod, TransportRequest};
pub use transport::{Completion, Transport, TransportResult, TransportTask};
