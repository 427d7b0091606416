//! Configuration types for the resource loader.
//!
//! # Overview
//!
//! - [`ServiceConfig`]: base URL and initial default headers for a
//!   [`Service`](crate::rest::Service)
//! - [`ServiceConfigBuilder`]: a builder for constructing [`ServiceConfig`] instances
//! - [`BaseUrl`]: a validated base URL that resource paths resolve against
//!
//! # Example
//!
//! ```rust
//! use resource_loader::{BaseUrl, ServiceConfig};
//!
//! let config = ServiceConfig::builder()
//!     .base_url(BaseUrl::new("https://example.org/api/v1/").unwrap())
//!     .header("Accept", "application/json")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://example.org/api/v1/");
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use crate::error::ConfigError;
use crate::rest::Headers;

/// Configuration for a [`Service`](crate::rest::Service).
///
/// `ServiceConfig` is `Clone`, `Send`, and `Sync`, so a single configuration
/// can seed several services (for example one per transport).
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    base_url: BaseUrl,
    default_headers: Option<Headers>,
}

impl ServiceConfig {
    /// Creates a new builder for constructing a `ServiceConfig`.
    #[must_use]
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the initial default headers, if any were configured.
    #[must_use]
    pub const fn default_headers(&self) -> Option<&Headers> {
        self.default_headers.as_ref()
    }

    /// Consumes the configuration, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> (BaseUrl, Option<Headers>) {
        (self.base_url, self.default_headers)
    }
}

// Verify ServiceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServiceConfig>();
};

/// Builder for constructing [`ServiceConfig`] instances.
///
/// `base_url` is required. Default headers are optional; when none are set the
/// service starts with no default headers at all (not an empty map).
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    base_url: Option<BaseUrl>,
    default_headers: Option<Headers>,
}

impl ServiceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets all default headers at once, replacing any set so far.
    #[must_use]
    pub fn default_headers(mut self, headers: Headers) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Adds a single default header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers
            .get_or_insert_with(Headers::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`ServiceConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// or [`ConfigError::InvalidHeader`] if a header name is empty or
    /// contains whitespace.
    pub fn build(self) -> Result<ServiceConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        if let Some(headers) = &self.default_headers {
            if let Some(name) = headers
                .keys()
                .find(|name| name.is_empty() || name.chars().any(char::is_whitespace))
            {
                return Err(ConfigError::InvalidHeader { name: name.clone() });
            }
        }

        Ok(ServiceConfig {
            base_url,
            default_headers: self.default_headers,
        })
    }
}
