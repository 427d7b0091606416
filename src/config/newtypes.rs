//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction with clear error messages.

use crate::error::ConfigError;
use reqwest::Url;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated base URL that resource paths are resolved against.
///
/// The URL must be absolute, use the `http` or `https` scheme, and be able to
/// act as a base for relative references.
///
/// # Resolution
///
/// Paths are resolved with standard relative-reference rules, so the
/// trailing slash on the base matters:
///
/// ```rust
/// use resource_loader::BaseUrl;
///
/// let base = BaseUrl::new("http://example.org/api/v1/").unwrap();
/// assert_eq!(base.join("examples").unwrap().as_str(), "http://example.org/api/v1/examples");
///
/// let base = BaseUrl::new("http://example.org/api/v1").unwrap();
/// assert_eq!(base.join("examples").unwrap().as_str(), "http://example.org/api/examples");
/// ```
///
/// # Serialization
///
/// `BaseUrl` serializes to and deserializes from its string form.
#[derive(Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse, is
    /// not http(s), or cannot be used as a base.
    pub fn new(url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = url.as_ref().trim();
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason,
        };

        let parsed = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme '{other}'"))),
        }

        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }

        Ok(Self(parsed))
    }

    /// Resolves a relative path against this base.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if the combination is malformed.
    pub fn join(&self, path: &str) -> Result<Url, ConfigError> {
        self.0.join(path).map_err(|e| ConfigError::InvalidPath {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BaseUrl({})", self.0)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl std::str::FromStr for BaseUrl {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
