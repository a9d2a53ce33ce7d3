//! HTTP capability boundary.
//!
//! The client only ever issues plain GET requests and reads the body as
//! text. This module provides the `HttpFetcher` trait for that capability,
//! a `reqwest` backed implementation, and helpers for composing headers.

mod headers;
mod reqwest_fetcher;
mod user_agent;

pub use headers::{minimal_headers, request_headers, Headers};
pub use reqwest_fetcher::ReqwestFetcher;
pub use user_agent::{RotatingUserAgent, StaticUserAgent, UserAgentSource};

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the transport itself, before any status is known.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The request did not complete within its timeout.
    #[error("Request timed out")]
    Timeout,

    /// Could not connect to the remote host.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Any other transport failure (TLS, malformed URL, body read).
    #[error("Transport error: {0}")]
    Other(String),
}

/// A single GET request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Headers,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, headers: Headers, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            headers,
            timeout,
        }
    }

    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response with its body already read as text.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to perform an HTTP GET.
///
/// Non-success statuses are returned as a normal response; only failures
/// to obtain a response at all are errors.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse {
            status: 200,
            body: String::new(),
        };
        let no_content = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let redirect = HttpResponse {
            status: 301,
            body: String::new(),
        };
        let forbidden = HttpResponse {
            status: 403,
            body: String::new(),
        };

        assert!(ok.is_success());
        assert!(no_content.is_success());
        assert!(!redirect.is_success());
        assert!(!forbidden.is_success());
    }

    #[test]
    fn test_request_header_lookup() {
        let request = HttpRequest::get(
            "https://example.com/",
            minimal_headers("agent/1.0"),
            Duration::from_secs(5),
        );

        assert_eq!(request.header("user-agent"), Some("agent/1.0"));
        assert_eq!(request.header("Referer"), None);
    }
}
