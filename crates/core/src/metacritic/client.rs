//! Search and detail orchestration.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::decoder::{parse_detail_response, parse_search_response};
use super::token::TokenBootstrapper;
use super::types::{AccessToken, DetailRecord, RecordKind, SearchCandidate};
use super::MetacriticError;
use crate::config::ClientConfig;
use crate::http::{
    request_headers, HttpFetcher, HttpRequest, ReqwestFetcher, RotatingUserAgent,
    StaticUserAgent, UserAgentSource,
};

/// Metacritic ratings client.
///
/// The access token is fetched lazily on first use and then reused for
/// the lifetime of the client. It is never refreshed automatically; call
/// [`reset_token`](Self::reset_token) to force a new bootstrap.
pub struct MetacriticClient {
    fetcher: Arc<dyn HttpFetcher>,
    user_agents: Arc<dyn UserAgentSource>,
    bootstrapper: TokenBootstrapper,
    search_url: String,
    base_url: String,
    referer: String,
    timeout: Duration,
    min_similarity: f64,
    token: RwLock<Option<AccessToken>>,
}

impl MetacriticClient {
    /// Create a client backed by `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self, MetacriticError> {
        let fetcher = Arc::new(ReqwestFetcher::new()?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Create a client on top of any HTTP capability.
    pub fn with_fetcher(config: ClientConfig, fetcher: Arc<dyn HttpFetcher>) -> Self {
        let user_agents: Arc<dyn UserAgentSource> = match &config.user_agent {
            Some(ua) => Arc::new(StaticUserAgent::new(ua.clone())),
            None => Arc::new(RotatingUserAgent::new()),
        };

        Self {
            fetcher,
            user_agents,
            bootstrapper: TokenBootstrapper::new(config.homepage_url.clone(), config.timeout()),
            search_url: config.search_url(),
            referer: config.referer().to_string(),
            timeout: config.timeout(),
            min_similarity: config.min_similarity,
            base_url: config.base_url,
            token: RwLock::new(None),
        }
    }

    /// Replace the User-Agent source.
    pub fn with_user_agent(mut self, user_agents: Arc<dyn UserAgentSource>) -> Self {
        self.user_agents = user_agents;
        self
    }

    /// Similarity floor applied to search candidates.
    pub fn min_similarity(&self) -> f64 {
        self.min_similarity
    }

    /// Whether an access token is currently cached.
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Drop the cached access token; the next lookup bootstraps a new one.
    pub async fn reset_token(&self) {
        *self.token.write().await = None;
    }

    /// Search for products matching `query`.
    ///
    /// Returns an empty list on any failure; the failure is logged once.
    pub async fn search(
        &self,
        query: &str,
        kind: Option<RecordKind>,
        sort_by_similarity: bool,
    ) -> Vec<SearchCandidate> {
        match self.try_search(query, kind, sort_by_similarity).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(query, error = %e, "Search failed");
                Vec::new()
            }
        }
    }

    /// Look up full ratings for the best match of `query`.
    ///
    /// Returns `None` when nothing matches or on any failure; failures are
    /// logged once.
    pub async fn get_detail(
        &self,
        query: &str,
        kind: RecordKind,
        sort_by_similarity: bool,
    ) -> Option<DetailRecord> {
        match self.try_get_detail(query, kind, sort_by_similarity).await {
            Ok(record) => record,
            Err(e) => {
                warn!(query, %kind, error = %e, "Detail lookup failed");
                None
            }
        }
    }

    /// [`get_detail`](Self::get_detail) keyed by the upstream numeric type id.
    ///
    /// An id with no detail endpoint is rejected before any request.
    pub async fn get_detail_by_type_id(
        &self,
        query: &str,
        type_id: u32,
        sort_by_similarity: bool,
    ) -> Option<DetailRecord> {
        if query.is_empty() {
            return None;
        }

        match RecordKind::try_from(type_id) {
            Ok(kind) => self.get_detail(query, kind, sort_by_similarity).await,
            Err(type_id) => {
                let e = MetacriticError::UnsupportedKind(type_id);
                warn!(query, error = %e, "Detail lookup failed");
                None
            }
        }
    }

    /// Like [`search`](Self::search) but surfaces the failure.
    pub async fn try_search(
        &self,
        query: &str,
        kind: Option<RecordKind>,
        sort_by_similarity: bool,
    ) -> Result<Vec<SearchCandidate>, MetacriticError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let token = self.ensure_token().await?;
        let url = self.search_request_url(query, &token, kind);

        debug!(query, kind = ?kind, "Searching");

        let body = self.fetch_text(url, "search").await?;
        let mut candidates =
            parse_search_response(&body, query, self.min_similarity, sort_by_similarity)?;

        if let Some(kind) = kind {
            candidates.retain(|c| {
                let keep = c.kind == kind;
                if !keep {
                    debug!(
                        query,
                        slug = %c.slug,
                        found = %c.kind,
                        expected = %kind,
                        "Dropping candidate of other kind"
                    );
                }
                keep
            });
        }

        debug!(query, count = candidates.len(), "Search decoded");

        Ok(candidates)
    }

    /// Like [`get_detail`](Self::get_detail) but surfaces the failure.
    ///
    /// `Ok(None)` means the search found no acceptable candidate.
    pub async fn try_get_detail(
        &self,
        query: &str,
        kind: RecordKind,
        sort_by_similarity: bool,
    ) -> Result<Option<DetailRecord>, MetacriticError> {
        if query.is_empty() {
            return Ok(None);
        }

        let token = self.ensure_token().await?;

        let candidates = self.try_search(query, Some(kind), sort_by_similarity).await?;
        let Some(best) = candidates.into_iter().next() else {
            debug!(query, %kind, "No candidate to fetch details for");
            return Ok(None);
        };

        debug!(query, slug = %best.slug, similarity = best.similarity, "Fetching details");

        let url = self.detail_request_url(kind, &best.slug, &token);
        let body = self.fetch_text(url, kind.detail_segment()).await?;
        let record = parse_detail_response(&body, best.is_editors_pick)?;

        Ok(Some(record))
    }

    /// Return the cached token, bootstrapping it if absent.
    ///
    /// Concurrent first calls may both bootstrap; the first stored token wins.
    async fn ensure_token(&self) -> Result<AccessToken, MetacriticError> {
        if let Some(token) = self.token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let fetched = self
            .bootstrapper
            .fetch_token(self.fetcher.as_ref(), &self.user_agents.user_agent())
            .await?;

        let mut guard = self.token.write().await;
        Ok(guard.get_or_insert(fetched).clone())
    }

    /// GET `url` with the full header set; non-success statuses are errors.
    async fn fetch_text(
        &self,
        url: String,
        endpoint: &'static str,
    ) -> Result<String, MetacriticError> {
        let headers = request_headers(&self.user_agents.user_agent(), &self.referer);
        let request = HttpRequest::get(url, headers, self.timeout);

        let response = self.fetcher.get(&request).await?;
        if !response.is_success() {
            return Err(MetacriticError::Status {
                status: response.status,
                endpoint,
            });
        }

        Ok(response.body)
    }

    fn search_request_url(
        &self,
        query: &str,
        token: &AccessToken,
        kind: Option<RecordKind>,
    ) -> String {
        let mut url = format!(
            "{}{}/web?apiKey={}",
            self.search_url,
            urlencoding::encode(query),
            urlencoding::encode(token.as_str())
        );

        if let Some(kind) = kind {
            url.push_str(&format!("&mcoTypeId={}", kind.type_id()));
        }

        url
    }

    fn detail_request_url(&self, kind: RecordKind, slug: &str, token: &AccessToken) -> String {
        format!(
            "{}{}/{}/web?apiKey={}",
            self.base_url,
            kind.detail_segment(),
            urlencoding::encode(slug),
            urlencoding::encode(token.as_str())
        )
    }
}
