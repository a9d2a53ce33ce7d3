//! Mock HTTP fetcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::http::{HttpFetcher, HttpRequest, HttpResponse, TransportError};

#[derive(Debug, Clone)]
struct Route {
    prefix: String,
    outcome: Result<HttpResponse, TransportError>,
}

/// Mock implementation of the HttpFetcher trait.
///
/// Provides controllable behavior for testing:
/// - Route canned responses by URL prefix (longest prefix wins)
/// - Track every request for assertions
/// - Simulate transport failures
///
/// Requests matching no route get an empty 404.
///
/// # Example
///
/// ```rust,ignore
/// use metascore_core::testing::{fixtures, MockHttpFetcher};
///
/// let fetcher = MockHttpFetcher::new();
/// fetcher.respond("https://www.metacritic.com/", 200, fixtures::homepage_html("key")).await;
/// fetcher.fail("https://backend.metacritic.com/", TransportError::Timeout).await;
/// ```
#[derive(Debug, Default)]
pub struct MockHttpFetcher {
    routes: Arc<RwLock<Vec<Route>>>,
    requests: Arc<RwLock<Vec<HttpRequest>>>,
    next_error: Arc<RwLock<Option<TransportError>>>,
}

impl MockHttpFetcher {
    /// Create a new mock with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Answer requests whose URL starts with `prefix`.
    pub async fn respond(&self, prefix: &str, status: u16, body: impl Into<String>) {
        self.route(
            prefix,
            Ok(HttpResponse {
                status,
                body: body.into(),
            }),
        )
        .await;
    }

    /// Fail requests whose URL starts with `prefix`.
    pub async fn fail(&self, prefix: &str, error: TransportError) {
        self.route(prefix, Err(error)).await;
    }

    /// Configure the next request, whatever its URL, to fail.
    pub async fn set_next_error(&self, error: TransportError) {
        *self.next_error.write().await = Some(error);
    }

    async fn route(&self, prefix: &str, outcome: Result<HttpResponse, TransportError>) {
        let mut routes = self.routes.write().await;
        routes.retain(|r| r.prefix != prefix);
        routes.push(Route {
            prefix: prefix.to_string(),
            outcome,
        });
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// All requests received, in order.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.read().await.clone()
    }

    /// Number of requests whose URL starts with `prefix`.
    pub async fn request_count(&self, prefix: &str) -> usize {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.url.starts_with(prefix))
            .count()
    }

    /// Total number of requests received.
    pub async fn total_requests(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl HttpFetcher for MockHttpFetcher {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.write().await.push(request.clone());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let routes = self.routes.read().await;
        routes
            .iter()
            .filter(|r| request.url.starts_with(&r.prefix))
            .max_by_key(|r| r.prefix.len())
            .map(|r| r.outcome.clone())
            .unwrap_or_else(|| {
                Ok(HttpResponse {
                    status: 404,
                    body: String::new(),
                })
            })
    }
}
