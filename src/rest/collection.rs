//! Multi-item resource descriptors.
//!
//! A [`ResourceCollection`] is built like a [`Resource`](crate::rest::Resource)
//! but expects a top-level JSON array and decodes every element. Decoding is
//! all-or-nothing: the first element that fails aborts the whole collection
//! with that element's error, and no partial list is returned.

use serde_json::Value;

use crate::rest::descriptor::{decode_object, Decoder, Descriptor, JsonBody, Shape};
use crate::rest::ResourceError;

/// Description of a multi-item remote endpoint.
///
/// [`parse`](Descriptor::parse) yields a `Vec<T>` in array order and fails
/// with:
///
/// - [`ResourceError::Deserialization`] if the bytes are not JSON
/// - [`ResourceError::NotAnArray`] if the top-level value is not an array
/// - the first failing element's error ([`ResourceError::NotADictionary`] or
///   [`ResourceError::InvalidModel`])
///
/// # Example
///
/// ```rust
/// use resource_loader::rest::{ResourceCollection, ResourceError};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Episode {
///     id: String,
/// }
///
/// let episodes = ResourceCollection::<Episode>::from_model("episodes");
///
/// let all = episodes.parse(br#"[{"id":"0"},{"id":"1"}]"#).unwrap();
/// assert_eq!(all.len(), 2);
///
/// let broken = episodes.parse(br#"[{"id":"0"},{"id":1}]"#);
/// assert!(matches!(broken, Err(ResourceError::InvalidModel)));
/// ```
pub type ResourceCollection<T, B = JsonBody> = Descriptor<T, B, Many>;

/// [`Shape`] of a response holding a JSON array of objects.
#[derive(Debug, Clone, Copy)]
pub struct Many;

impl Shape for Many {
    type Output<T> = Vec<T>;

    const NAME: &'static str = "ResourceCollection";

    fn parse<T>(bytes: &[u8], decode: &Decoder<T>) -> Result<Vec<T>, ResourceError> {
        let value: Value = serde_json::from_slice(bytes).map_err(ResourceError::Deserialization)?;
        let items = match value {
            Value::Array(items) => items,
            other => return Err(ResourceError::NotAnArray(other)),
        };

        // `collect` into a Result stops at the first failing element.
        items
            .into_iter()
            .map(|item| decode_object(item, decode))
            .collect()
    }
}
