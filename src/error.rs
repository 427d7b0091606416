//! Configuration error types.
//!
//! This module contains the error type returned when building a service
//! configuration or validating the values that go into it.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use resource_loader::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring a [`Service`](crate::rest::Service).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL could not be parsed or cannot act as a base.
    #[error("Invalid base URL '{url}': {reason}. Expected an absolute http(s) URL such as 'https://example.org/api/v1/'.")]
    InvalidBaseUrl {
        /// The URL that was provided.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A resource path could not be resolved against the base URL.
    #[error("Cannot resolve path '{path}' against the base URL: {reason}")]
    InvalidPath {
        /// The path that was provided.
        path: String,
        /// Why resolution failed.
        reason: String,
    },

    /// A default header has an empty name.
    #[error("Invalid header '{name}': header names cannot be empty or contain whitespace.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_error_message() {
        let error = ConfigError::InvalidBaseUrl {
            url: "ftp:/nowhere".to_string(),
            reason: "unsupported scheme 'ftp'".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("ftp:/nowhere"));
        assert!(message.contains("unsupported scheme"));
        assert!(message.contains("Expected an absolute http(s) URL"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let message = error.to_string();
        assert!(message.contains("base_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidHeader {
            name: String::new(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
