//! HTTP request types handed to a [`Transport`](crate::clients::Transport).
//!
//! This module provides [`HttpMethod`] and [`TransportRequest`], the plain-data
//! description of a request after the service has resolved its URL, merged its
//! headers, and packaged its body.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use reqwest::Url;

use crate::clients::errors::InvalidHttpMethodError;
use crate::rest::Headers;

/// HTTP methods a resource can be requested with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    #[default]
    Get,
    /// HTTP HEAD method.
    Head,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
    /// HTTP OPTIONS method.
    Options,
}

impl HttpMethod {
    /// Returns the protocol-level token for this method (e.g. `"GET"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = InvalidHttpMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(InvalidHttpMethodError {
                method: s.to_string(),
            }),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Head => Self::HEAD,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
            HttpMethod::Options => Self::OPTIONS,
        }
    }
}

/// A fully-resolved request ready to be submitted to a transport.
///
/// `headers` is `None` when neither the service nor the caller supplied any
/// and the request carries no body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The absolute destination URL.
    pub url: Url,
    /// Headers to send, if any.
    pub headers: Option<Headers>,
    /// The serialized request body, if any.
    pub body: Option<Bytes>,
}

impl TransportRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: None,
            body: None,
        }
    }

    /// Returns the value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_tokens() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_http_method_defaults_to_get() {
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn test_http_method_parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!(
            "OPTIONS".parse::<HttpMethod>().unwrap(),
            HttpMethod::Options
        );
    }

    #[test]
    fn test_http_method_rejects_unknown_token() {
        let error = "BREW".parse::<HttpMethod>().unwrap_err();
        assert_eq!(error.method, "BREW");
    }

    #[test]
    fn test_http_method_converts_to_reqwest() {
        assert_eq!(reqwest::Method::from(HttpMethod::Put), reqwest::Method::PUT);
        assert_eq!(
            reqwest::Method::from(HttpMethod::Head),
            reqwest::Method::HEAD
        );
    }

    #[test]
    fn test_request_header_lookup_ignores_case() {
        let mut request = TransportRequest::new(
            HttpMethod::Post,
            Url::parse("http://example.org/api/").unwrap(),
        );
        assert!(request.header("Content-Type").is_none());

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        request.headers = Some(headers);

        assert_eq!(request.header("content-type"), Some("application/json"));
    }
}
