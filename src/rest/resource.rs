//! Single-item resource descriptors.
//!
//! A [`Resource`] describes one endpoint whose response is a single JSON
//! object: the HTTP method, a path relative to the service's base URL, an
//! optional outgoing payload, and a decoder that turns the object into a
//! domain value.
//!
//! # Example
//!
//! ```rust
//! use resource_loader::rest::Resource;
//! use resource_loader::HttpMethod;
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Deserialize, PartialEq, Eq)]
//! struct Episode {
//!     id: String,
//!     title: String,
//! }
//!
//! // Decode with serde
//! let episode = Resource::<Episode>::from_model("episodes/7");
//! let parsed = episode.parse(br#"{"id":"7","title":"X"}"#).unwrap();
//! assert_eq!(parsed.title, "X");
//!
//! // Or with a hand-written decoder and a JSON body
//! let create = Resource::new("episodes", |object| {
//!     object.get("id").and_then(|id| id.as_str()).map(str::to_string)
//! })
//! .with_method(HttpMethod::Post)
//! .with_json(json!({"title": "X"}));
//! assert!(create.package().unwrap().is_some());
//! ```

use serde_json::Value;

use crate::rest::descriptor::{decode_object, Decoder, Descriptor, JsonBody, Shape};
use crate::rest::ResourceError;

/// Description of a single-item remote endpoint.
///
/// `T` is the decoded type and `B` the outgoing payload type. `B` defaults to
/// [`JsonBody`], but any `Serialize` type can be sent via
/// [`Descriptor::with_body`].
///
/// [`parse`](Descriptor::parse) yields a `T` and fails with:
///
/// - [`ResourceError::Deserialization`] if the bytes are not JSON
/// - [`ResourceError::NotADictionary`] if the top-level value is not an object
/// - [`ResourceError::InvalidModel`] if the decoder rejects the object
pub type Resource<T, B = JsonBody> = Descriptor<T, B, One>;

/// [`Shape`] of a response holding a single JSON object.
#[derive(Debug, Clone, Copy)]
pub struct One;

impl Shape for One {
    type Output<T> = T;

    const NAME: &'static str = "Resource";

    fn parse<T>(bytes: &[u8], decode: &Decoder<T>) -> Result<T, ResourceError> {
        let value: Value = serde_json::from_slice(bytes).map_err(ResourceError::Deserialization)?;
        decode_object(value, decode)
    }
}
