//! # Resource Loader
//!
//! A small typed layer for loading JSON resources from a REST-style service.
//!
//! ## Overview
//!
//! This crate provides:
//! - Typed endpoint descriptors: [`Resource`] for a single item and
//!   [`ResourceCollection`] for a list of items
//! - A [`Service`] that resolves paths against a [`BaseUrl`], merges default
//!   and per-call headers, submits requests, and parses the responses
//! - An injectable [`Transport`] seam with a production implementation over
//!   `reqwest` ([`ReqwestTransport`]) and a canned-response implementation for
//!   tests ([`FakeTransport`])
//! - A closed error taxonomy ([`ResourceError`]) naming the stage at which a
//!   load failed
//!
//! ## Quick Start
//!
//! ```rust
//! use resource_loader::{BaseUrl, FakeTransport, ResourceCollection, Service};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize)]
//! struct Example {
//!     id: String,
//!     title: String,
//! }
//!
//! let transport = FakeTransport::new();
//! transport.register(
//!     "http://example.org/api/v1/examples",
//!     json!([
//!         {"id": "0", "title": "first"},
//!         {"id": "1", "title": "second"},
//!     ]),
//! );
//!
//! let service = Service::new(BaseUrl::new("http://example.org/api/v1/").unwrap(), transport);
//! let examples = ResourceCollection::<Example>::from_model("examples");
//!
//! service.load_collection(&examples, None, |result| {
//!     let examples = result.unwrap();
//!     assert_eq!(examples.len(), 2);
//!     assert_eq!(examples[1].title, "second");
//! });
//! ```
//!
//! ## Over the Network
//!
//! ```rust,ignore
//! use resource_loader::{BaseUrl, Resource, ReqwestTransport, Service, ServiceConfig};
//! use std::time::Duration;
//!
//! let config = ServiceConfig::builder()
//!     .base_url(BaseUrl::new("https://example.org/api/v1/")?)
//!     .header("Authorization", "Bearer token")
//!     .build()?;
//!
//! let transport = ReqwestTransport::builder()
//!     .user_agent_prefix("MyApp/1.0")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! let service = Service::from_config(config, transport);
//!
//! let me = Resource::<User>::from_model("me");
//! let user = service.fetch(&me, None).await?;
//! ```
//!
//! ## Custom Decoding
//!
//! Decoders receive the JSON object and return `None` to reject it, which is
//! reported as [`ResourceError::InvalidModel`]:
//!
//! ```rust
//! use resource_loader::{Resource, ResourceError};
//!
//! let count = Resource::new("stats", |object| object.get("count")?.as_u64());
//!
//! assert_eq!(count.parse(br#"{"count": 3}"#).unwrap(), 3);
//! assert!(matches!(
//!     count.parse(br#"{"count": "three"}"#),
//!     Err(ResourceError::InvalidModel)
//! ));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Services are instance-based and passed explicitly
//! - **Descriptors are values**: A resource is immutable and can be reused for any number of loads
//! - **Exactly one outcome**: Every load completes once, with a value or a [`ResourceError`]
//! - **Thread-safe**: Services and descriptors are `Send + Sync`

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{BaseUrl, ServiceConfig, ServiceConfigBuilder};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    FakeTransport, HttpMethod, ReqwestTransport, ReqwestTransportBuilder, Transport,
    TransportError, TransportRequest, TransportTask,
};

// Re-export resource types
pub use rest::{
    merge_headers, Headers, JsonBody, LoadHandle, Resource, ResourceCollection, ResourceError,
    Service,
};
