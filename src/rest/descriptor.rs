//! The endpoint description shared by every descriptor type.
//!
//! [`Resource`](crate::rest::Resource) and
//! [`ResourceCollection`](crate::rest::ResourceCollection) are both a
//! [`Descriptor`]; they differ only in their [`Shape`], which decides whether
//! the response body is one JSON object or an array of them and what
//! [`Descriptor::parse`] returns.
//!
//! Descriptors hold no per-request state. Build one per endpoint and load it
//! as many times as needed.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::HttpMethod;
use crate::rest::ResourceError;

/// A decoded JSON object.
pub type JsonObject = Map<String, Value>;

/// Shared decoding function: `None` means the object was rejected.
pub type Decoder<T> = Arc<dyn Fn(JsonObject) -> Option<T> + Send + Sync>;

/// An outgoing JSON payload: either an object or an array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JsonBody {
    /// A JSON object.
    Object(JsonObject),
    /// A JSON array.
    Array(Vec<Value>),
}

impl JsonBody {
    /// Wraps a JSON value, returning `None` unless it is an object or array.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(object) => Some(Self::Object(object)),
            Value::Array(items) => Some(Self::Array(items)),
            _ => None,
        }
    }
}

impl From<JsonObject> for JsonBody {
    fn from(object: JsonObject) -> Self {
        Self::Object(object)
    }
}

impl From<Vec<Value>> for JsonBody {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

/// How a response body is laid out, and what parsing it produces.
pub trait Shape: 'static {
    /// The parsed value for decoded type `T`.
    type Output<T>;

    /// Name shown in `Debug` output.
    const NAME: &'static str;

    /// Parses response bytes, running `decode` on every JSON object found.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails.
    fn parse<T>(bytes: &[u8], decode: &Decoder<T>) -> Result<Self::Output<T>, ResourceError>;
}

/// Description of a remote endpoint.
///
/// `T` is the decoded type, `B` the outgoing payload type, and `S` the
/// response [`Shape`]. Use it through the
/// [`Resource`](crate::rest::Resource) and
/// [`ResourceCollection`](crate::rest::ResourceCollection) aliases.
pub struct Descriptor<T, B, S> {
    method: HttpMethod,
    path: String,
    body: Option<B>,
    decode: Decoder<T>,
    shape: PhantomData<fn() -> S>,
}

impl<T, S> Descriptor<T, JsonBody, S> {
    /// Creates a `GET` descriptor with no body and the given decoder.
    ///
    /// For collections the decoder runs once per array element.
    pub fn new<F>(path: impl Into<String>, decode: F) -> Self
    where
        F: Fn(JsonObject) -> Option<T> + Send + Sync + 'static,
    {
        Self::from_parts(HttpMethod::Get, path, None, decode)
    }

    /// Attaches a JSON payload.
    ///
    /// Values that are neither objects nor arrays are not valid payloads and
    /// leave the descriptor without a body.
    #[must_use]
    pub fn with_json(mut self, value: Value) -> Self {
        self.body = JsonBody::from_value(value);
        self
    }
}

impl<T, S> Descriptor<T, JsonBody, S>
where
    T: DeserializeOwned + 'static,
{
    /// Creates a `GET` descriptor that decodes objects with serde.
    ///
    /// A serde failure on a well-formed object is reported as
    /// [`ResourceError::InvalidModel`].
    pub fn from_model(path: impl Into<String>) -> Self {
        Self::new(path, decode_with_serde)
    }
}

impl<T, B, S> Descriptor<T, B, S> {
    /// Creates a descriptor from all of its parts.
    pub fn from_parts<F>(
        method: HttpMethod,
        path: impl Into<String>,
        body: Option<B>,
        decode: F,
    ) -> Self
    where
        F: Fn(JsonObject) -> Option<T> + Send + Sync + 'static,
    {
        Self {
            method,
            path: path.into(),
            body,
            decode: Arc::new(decode),
            shape: PhantomData,
        }
    }

    /// Returns a copy with a different HTTP method.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Replaces the payload with any serializable value.
    #[must_use]
    pub fn with_body<C>(self, body: C) -> Descriptor<T, C, S> {
        Descriptor {
            method: self.method,
            path: self.path,
            body: Some(body),
            decode: self.decode,
            shape: PhantomData,
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the path relative to the service's base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the outgoing payload, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Transforms every decoded value with `f`.
    pub fn map<U, F>(self, f: F) -> Descriptor<U, B, S>
    where
        T: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let decode = self.decode;
        Descriptor {
            method: self.method,
            path: self.path,
            body: self.body,
            decode: Arc::new(move |object| decode(object).map(&f)),
            shape: PhantomData,
        }
    }

    pub(crate) fn decoder(&self) -> Decoder<T> {
        Arc::clone(&self.decode)
    }
}

impl<T, B, S: Shape> Descriptor<T, B, S> {
    /// Parses response bytes according to the descriptor's shape.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Deserialization`] if the bytes are not JSON
    /// - [`ResourceError::NotADictionary`] or [`ResourceError::NotAnArray`]
    ///   if the JSON has the wrong shape
    /// - [`ResourceError::InvalidModel`] if the decoder rejects an object
    pub fn parse(&self, bytes: &[u8]) -> Result<S::Output<T>, ResourceError> {
        S::parse(bytes, &self.decode)
    }
}

impl<T, B: Serialize, S> Descriptor<T, B, S> {
    /// Serializes the payload, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if the payload cannot be
    /// encoded as JSON.
    pub fn package(&self) -> Result<Option<Bytes>, ResourceError> {
        self.body
            .as_ref()
            .map(|body| serde_json::to_vec(body).map(Bytes::from))
            .transpose()
            .map_err(ResourceError::Serialization)
    }
}

impl<T, B: Clone, S> Clone for Descriptor<T, B, S> {
    fn clone(&self) -> Self {
        Self {
            method: self.method,
            path: self.path.clone(),
            body: self.body.clone(),
            decode: Arc::clone(&self.decode),
            shape: PhantomData,
        }
    }
}

impl<T, B: fmt::Debug, S: Shape> fmt::Debug for Descriptor<T, B, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(S::NAME)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Runs `decode` on `value` if it is an object.
pub fn decode_object<T>(value: Value, decode: &Decoder<T>) -> Result<T, ResourceError> {
    match value {
        Value::Object(object) => decode(object).ok_or(ResourceError::InvalidModel),
        other => Err(ResourceError::NotADictionary(other)),
    }
}

fn decode_with_serde<T: DeserializeOwned>(object: JsonObject) -> Option<T> {
    serde_json::from_value(Value::Object(object))
        .map_err(|e| tracing::debug!("Model decoding rejected object: {}", e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::{Resource, ResourceCollection};
    use serde_json::json;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            Err(serde::ser::Error::custom("refusing to encode"))
        }
    }

    fn titles() -> Resource<String> {
        Resource::new("episodes/1", |object| {
            object.get("title")?.as_str().map(str::to_string)
        })
    }

    #[test]
    fn test_new_defaults_to_get_without_body() {
        let resource = titles();
        assert_eq!(resource.method(), HttpMethod::Get);
        assert_eq!(resource.path(), "episodes/1");
        assert!(resource.body().is_none());
    }

    #[test]
    fn test_package_without_body_yields_none() {
        assert!(titles().package().unwrap().is_none());

        let all = ResourceCollection::<u64>::new("ids", |object| object.get("id")?.as_u64());
        assert!(all.package().unwrap().is_none());
    }

    #[test]
    fn test_package_serializes_object_body() {
        let resource = titles().with_json(json!({"id": "7", "title": "X"}));
        let bytes = resource.package().unwrap().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"id": "7", "title": "X"}));
    }

    #[test]
    fn test_package_serializes_array_body() {
        let resource = titles().with_json(json!([1, "two", null]));
        let bytes = resource.package().unwrap().unwrap();
        assert_eq!(&bytes[..], br#"[1,"two",null]"#);
    }

    #[test]
    fn test_with_json_ignores_scalars() {
        let resource = titles().with_json(json!("just a string"));
        assert!(resource.body().is_none());
    }

    #[test]
    fn test_package_reports_serialization_failure() {
        let resource = titles().with_body(Unencodable);
        assert!(matches!(
            resource.package(),
            Err(ResourceError::Serialization(_))
        ));
    }

    #[test]
    fn test_with_method_keeps_path_and_body() {
        let resource = titles()
            .with_json(json!({"title": "X"}))
            .with_method(HttpMethod::Put);

        assert_eq!(resource.method(), HttpMethod::Put);
        assert_eq!(resource.path(), "episodes/1");
        assert!(resource.body().is_some());
    }

    #[test]
    fn test_clone_shares_decoder() {
        let resource = titles().with_method(HttpMethod::Patch);
        let copy = resource.clone();

        assert_eq!(copy.method(), HttpMethod::Patch);
        assert_eq!(copy.parse(br#"{"title":"a"}"#).unwrap(), "a");
        assert_eq!(resource.parse(br#"{"title":"b"}"#).unwrap(), "b");
    }

    #[test]
    fn test_debug_names_the_shape_and_omits_decoder() {
        let debug = format!("{:?}", titles());
        assert!(debug.starts_with("Resource {"));
        assert!(debug.contains("episodes/1"));

        let all = ResourceCollection::<String>::from_model("episodes");
        assert!(format!("{all:?}").starts_with("ResourceCollection {"));
    }

    #[test]
    fn test_decode_object_rejects_non_objects() {
        let decode: Decoder<Value> = Arc::new(|object| Some(Value::Object(object)));

        assert!(decode_object(json!({"a": 1}), &decode).is_ok());
        assert!(matches!(
            decode_object(json!(3), &decode),
            Err(ResourceError::NotADictionary(Value::Number(_)))
        ));
    }

    #[test]
    fn test_descriptors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Resource<String>>();
        assert_send_sync::<ResourceCollection<String>>();
    }
}
