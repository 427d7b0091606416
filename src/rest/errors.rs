//! Error taxonomy for resource loads.
//!
//! Every load finishes with either a decoded value or exactly one
//! [`ResourceError`]. The variants separate the stage that failed:
//!
//! - **Packaging**: [`ResourceError::Serialization`]
//! - **Transport**: [`ResourceError::Network`], [`ResourceError::Cancelled`],
//!   [`ResourceError::Unexpected`], [`ResourceError::EmptyResult`]
//! - **Format**: [`ResourceError::Deserialization`]
//! - **Shape**: [`ResourceError::NotADictionary`], [`ResourceError::NotAnArray`]
//! - **Domain validation**: [`ResourceError::InvalidModel`]
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_loader::rest::ResourceError;
//!
//! match service.fetch(&resource, None).await {
//!     Ok(item) => println!("Loaded: {item:?}"),
//!     Err(ResourceError::InvalidModel) => println!("Payload failed validation"),
//!     Err(ResourceError::Network(cause)) => println!("Transport failed: {cause}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::clients::TransportError;

/// Error type for resource loads.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The transport finished without bytes and without an error.
    #[error("The request completed without returning any data")]
    EmptyResult,

    /// A single resource's response was valid JSON but not an object.
    #[error("Expected a JSON object but received: {0}")]
    NotADictionary(Value),

    /// A collection's response was valid JSON but not an array.
    #[error("Expected a JSON array but received: {0}")]
    NotAnArray(Value),

    /// The decoder rejected a well-formed JSON object.
    #[error("The response did not describe a valid model")]
    InvalidModel,

    /// The outgoing payload could not be encoded as JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response bytes were not valid JSON.
    #[error("Failed to deserialize response body: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The transport failed to deliver a response.
    #[error("Request failed: {0}")]
    Network(#[source] TransportError),

    /// The request was cancelled before it completed.
    #[error("Request was cancelled")]
    Cancelled,

    /// A test transport had no canned response for the destination.
    #[error("No response registered for {url}")]
    Unexpected {
        /// The exact destination that was requested.
        url: String,
    },
}

impl From<TransportError> for ResourceError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Cancelled => Self::Cancelled,
            TransportError::Unexpected { url } => Self::Unexpected { url },
            other => Self::Network(other),
        }
    }
}
