//! Transport-level error types.
//!
//! # Error Handling
//!
//! - [`TransportError`]: everything a [`Transport`](crate::clients::Transport)
//!   can deliver to a completion instead of bytes
//! - [`InvalidHttpMethodError`]: an unrecognised method token was parsed
//!
//! The service classifies these when it builds a
//! [`ResourceError`](crate::rest::ResourceError): `Cancelled` and `Unexpected`
//! keep their identity, everything else becomes a network error.

use thiserror::Error;

/// Failure delivered by a transport in place of response bytes.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The task was cancelled before it produced a result.
    #[error("Request was cancelled")]
    Cancelled,

    /// A test transport had no canned response registered for the URL.
    #[error("No response registered for {url}")]
    Unexpected {
        /// The exact destination that was requested.
        url: String,
    },

    /// The server answered with a non-2xx status.
    #[error("Server responded with status {code}: {body}")]
    Status {
        /// The HTTP status code.
        code: u16,
        /// The response body as text, possibly empty.
        body: String,
    },

    /// The task was started outside of a Tokio runtime.
    #[error("No Tokio runtime is available to execute the request")]
    NoRuntime,

    /// The underlying HTTP client failed (connection, TLS, decoding, ...).
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Error returned when parsing an unknown HTTP method token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid Http method {method}.")]
pub struct InvalidHttpMethodError {
    /// The token that was provided.
    pub method: String,
}
