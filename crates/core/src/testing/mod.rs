//! Testing utilities and mock implementations.
//!
//! This module provides a mock HTTP capability and builders for the
//! backend's component-bag responses, allowing the client to be exercised
//! end to end without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use metascore_core::testing::{fixtures, MockHttpFetcher};
//!
//! let fetcher = Arc::new(MockHttpFetcher::new());
//! fetcher.respond(HOMEPAGE, 200, fixtures::homepage_html("key")).await;
//! fetcher.respond(SEARCH, 200, fixtures::search_bag(&[fixtures::search_item(1, "Halo")])).await;
//!
//! let client = MetacriticClient::with_fetcher(ClientConfig::default(), fetcher.clone());
//! ```

mod mock_http;

pub use mock_http::MockHttpFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::metacritic::RecordKind;

    /// Homepage HTML with the access token embedded in its second script.
    pub fn homepage_html(token: &str) -> String {
        format!(
            concat!(
                "<!DOCTYPE html><html><head>",
                "<script>window.dataLayer = [];</script>",
                "<script type=\"text/javascript\">",
                "window.__CONFIG__ = {{ search: \"/composer/search?apiKey={}&lang=en\" }};",
                "</script>",
                "</head><body><h1>Metacritic</h1></body></html>"
            ),
            token
        )
    }

    /// A game search item with a critic score and no editors pick.
    pub fn search_item(id: u64, title: &str) -> Value {
        search_item_of(id, RecordKind::Game, title, false)
    }

    /// A search item of any kind; the pick flag is set on the kind's field.
    pub fn search_item_of(id: u64, kind: RecordKind, title: &str, editors_pick: bool) -> Value {
        let pick_field = match kind {
            RecordKind::TvShow => "mustSee",
            RecordKind::Movie => "mustWatch",
            RecordKind::Game => "mustPlay",
        };

        let mut item = json!({
            "id": id,
            "typeId": kind.type_id(),
            "title": title,
            "slug": slugify(title),
            "criticScoreSummary": { "score": 75 },
        });
        item[pick_field] = Value::Bool(editors_pick);
        item
    }

    /// A search response carrying `items`, preceded by an unrelated component.
    pub fn search_bag(items: &[Value]) -> String {
        json!({
            "components": [
                component("page-header", json!({ "title": "Search" })),
                component("search", json!({ "items": items })),
            ]
        })
        .to_string()
    }

    /// A detail response with product, critic and user score components.
    pub fn detail_bag(id: u64, kind: RecordKind, title: &str) -> String {
        json!({
            "components": [
                product_component(id, kind, title),
                score_component("critic-score-summary", 88.0, 100.0, "Generally favorable"),
                score_component("user-score-summary", 8.1, 10.0, "Generally favorable"),
            ]
        })
        .to_string()
    }

    /// A single tagged component.
    pub fn component(name: &str, data: Value) -> Value {
        json!({ "meta": { "componentName": name }, "data": data })
    }

    /// A `product` component.
    pub fn product_component(id: u64, kind: RecordKind, title: &str) -> Value {
        component(
            "product",
            json!({
                "item": {
                    "id": id,
                    "typeId": kind.type_id(),
                    "title": title,
                    "slug": slugify(title),
                }
            }),
        )
    }

    /// A score summary component with fixed review counts.
    pub fn score_component(name: &str, score: f64, max: f64, sentiment: &str) -> Value {
        component(
            name,
            json!({
                "item": {
                    "score": score,
                    "max": max,
                    "sentiment": sentiment,
                    "positiveCount": 40,
                    "neutralCount": 5,
                    "negativeCount": 2,
                    "reviewCount": 47,
                }
            }),
        )
    }

    /// Lowercase, dash-separated slug.
    pub fn slugify(title: &str) -> String {
        title
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}
