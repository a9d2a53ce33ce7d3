//! Access token bootstrapping.
//!
//! The backend API requires an `apiKey` query parameter. It is not
//! published anywhere; the website embeds it in inline scripts on the
//! homepage, so we fetch the homepage and scrape it out.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use super::types::AccessToken;
use super::MetacriticError;
use crate::http::{minimal_headers, HttpFetcher, HttpRequest};

static SCRIPT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<script[^>]*>(.*?)</script>").expect("script block regex should compile")
});

static API_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"apiKey=([^"&]+)"#).expect("api key regex should compile"));

/// Fetches the homepage and extracts an access token from it.
#[derive(Debug, Clone)]
pub struct TokenBootstrapper {
    homepage_url: String,
    timeout: Duration,
}

impl TokenBootstrapper {
    pub fn new(homepage_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            homepage_url: homepage_url.into(),
            timeout,
        }
    }

    /// Fetch the homepage with minimal headers and scrape the token.
    pub async fn fetch_token(
        &self,
        fetcher: &dyn HttpFetcher,
        user_agent: &str,
    ) -> Result<AccessToken, MetacriticError> {
        debug!(url = %self.homepage_url, "Bootstrapping access token");

        let request = HttpRequest::get(
            self.homepage_url.as_str(),
            minimal_headers(user_agent),
            self.timeout,
        );
        let response = fetcher.get(&request).await?;

        if !response.is_success() {
            return Err(MetacriticError::Status {
                status: response.status,
                endpoint: "homepage",
            });
        }

        extract_access_token(&response.body).ok_or(MetacriticError::NoToken)
    }
}

/// Scan inline scripts in document order for the first `apiKey=...`.
pub fn extract_access_token(html: &str) -> Option<AccessToken> {
    SCRIPT_PATTERN
        .captures_iter(html)
        .filter_map(|script| script.get(1))
        .find_map(|script| {
            API_KEY_PATTERN
                .captures(script.as_str())
                .and_then(|caps| caps.get(1))
                .map(|m| AccessToken::new(m.as_str()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_single_script() {
        let html = r#"<html><head><script>var url = "https://backend/x?apiKey=abc123&foo=1";</script></head></html>"#;
        assert_eq!(extract_access_token(html), Some(AccessToken::new("abc123")));
    }

    #[test]
    fn test_value_stops_at_quote() {
        let html = r#"<script type="text/javascript">window.cfg = "apiKey=k3y";</script>"#;
        assert_eq!(extract_access_token(html), Some(AccessToken::new("k3y")));
    }

    #[test]
    fn test_first_matching_script_wins() {
        let html = concat!(
            "<script>console.log('nothing here');</script>",
            "<script src=\"/a.js\"></script>",
            "<script>\nfetch(\"/api?apiKey=first\")\n</script>",
            "<script>fetch(\"/api?apiKey=second\")</script>",
        );
        assert_eq!(extract_access_token(html), Some(AccessToken::new("first")));
    }

    #[test]
    fn test_multiline_script_body() {
        let html = "<script>\nvar a = 1;\nvar b = \"?apiKey=multi&x=1\";\n</script>";
        assert_eq!(extract_access_token(html), Some(AccessToken::new("multi")));
    }

    #[test]
    fn test_key_outside_script_ignored() {
        let html = r#"<a href="/search?apiKey=not-a-script">x</a><script>var a = 1;</script>"#;
        assert_eq!(extract_access_token(html), None);
    }

    #[test]
    fn test_empty_value_not_matched() {
        let html = r#"<script>var u = "apiKey=";</script>"#;
        assert_eq!(extract_access_token(html), None);
    }

    #[test]
    fn test_no_scripts() {
        assert_eq!(extract_access_token("<html><body>hi</body></html>"), None);
        assert_eq!(extract_access_token(""), None);
    }
}
