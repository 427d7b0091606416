//! Resource descriptors and the service that loads them.
//!
//! This module provides:
//!
//! - **[`Resource<T>`]**: how to request a single item and decode it from a JSON object
//! - **[`ResourceCollection<T>`]**: the same for a JSON array of items
//! - **[`Service`]**: resolves, packages, submits, and parses loads through a
//!   [`Transport`](crate::clients::Transport)
//! - **[`merge_headers`]**: the header policy applied to every request
//! - **[`ResourceError`]**: the closed set of ways a load can fail
//!
//! Both descriptor types are aliases of one [`Descriptor`]; its [`Shape`]
//! parameter ([`One`] or [`Many`]) decides how the response is parsed.
//!
//! # Example: Loading a Collection
//!
//! ```rust,ignore
//! use resource_loader::{BaseUrl, Service};
//! use resource_loader::rest::ResourceCollection;
//!
//! #[derive(Debug, serde::Deserialize)]
//! struct Episode {
//!     id: String,
//!     title: String,
//! }
//!
//! let service = Service::with_reqwest(BaseUrl::new("https://example.org/api/v1/")?);
//! let episodes = ResourceCollection::<Episode>::from_model("episodes");
//!
//! for episode in service.fetch_collection(&episodes, None).await? {
//!     println!("{}: {}", episode.id, episode.title);
//! }
//! ```
//!
//! # Example: Creating an Item
//!
//! ```rust,ignore
//! use resource_loader::rest::Resource;
//! use resource_loader::HttpMethod;
//! use serde_json::json;
//!
//! let create = Resource::<Episode>::from_model("episodes")
//!     .with_method(HttpMethod::Post)
//!     .with_json(json!({"title": "Pilot"}));
//!
//! // Content-Type: application/json is set automatically
//! let created = service.fetch(&create, None).await?;
//! ```

mod collection;
mod descriptor;
mod errors;
mod headers;
mod resource;
mod service;

pub use collection::{Many, ResourceCollection};
pub use descriptor::{Decoder, Descriptor, JsonBody, JsonObject, Shape};
pub use errors::ResourceError;
pub use headers::{merge_headers, Headers, CONTENT_TYPE, JSON_CONTENT_TYPE};
pub use resource::{One, Resource};
pub use service::{LoadHandle, Service};
