//! Decoding of the backend "component bag" responses.
//!
//! Every backend page is returned as `{ "components": [...] }` where each
//! component is tagged by `meta.componentName` and carries its payload in
//! `data`. Decoding looks a component up by tag and then projects its
//! `data` onto a typed struct.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{DetailRecord, RecordKind, ReviewCounts, ScoreSummary, SearchCandidate};
use crate::similarity::similarity;

const SEARCH_COMPONENT: &str = "search";
const PRODUCT_COMPONENT: &str = "product";
const CRITIC_SCORE_COMPONENT: &str = "critic-score-summary";
const USER_SCORE_COMPONENT: &str = "user-score-summary";

/// Errors raised while decoding a backend response.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Body is not valid JSON or has no component list.
    #[error("Invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// A required component is not present in the bag.
    #[error("Missing component '{0}'")]
    MissingComponent(&'static str),

    /// A component is present but its data has an unexpected shape.
    #[error("Invalid '{component}' component: {reason}")]
    InvalidComponent {
        component: &'static str,
        reason: String,
    },
}

// ============================================================================
// Envelope
// ============================================================================

#[derive(Debug, Deserialize)]
struct ComponentBag {
    components: Vec<Component>,
}

#[derive(Debug, Deserialize)]
struct Component {
    #[serde(default)]
    meta: ComponentMeta,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComponentMeta {
    #[serde(default)]
    component_name: Option<String>,
}

impl ComponentBag {
    fn parse(body: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(body)?)
    }

    /// First component tagged `name`, in document order.
    fn find(&self, name: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.meta.component_name.as_deref() == Some(name))
    }

    /// Project the `data` of the component tagged `name` onto `T`.
    fn project<T: DeserializeOwned>(&self, name: &'static str) -> Result<T, DecodeError> {
        let component = self.find(name).ok_or(DecodeError::MissingComponent(name))?;
        T::deserialize(&component.data).map_err(|e| DecodeError::InvalidComponent {
            component: name,
            reason: e.to_string(),
        })
    }
}

// ============================================================================
// Raw payloads (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchData {
    items: Vec<RawSearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearchItem {
    #[serde(deserialize_with = "deserialize_external_id")]
    id: u64,
    type_id: u32,
    title: String,
    slug: String,
    #[serde(default)]
    critic_score_summary: Option<RawCriticScore>,
    #[serde(default)]
    must_see: Option<bool>,
    #[serde(default)]
    must_watch: Option<bool>,
    #[serde(default)]
    must_play: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawCriticScore {
    #[serde(default)]
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ItemData<T> {
    item: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(deserialize_with = "deserialize_external_id")]
    id: u64,
    type_id: u32,
    title: String,
    slug: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScoreSummary {
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    #[serde(default)]
    sentiment: Option<String>,
    #[serde(default)]
    positive_count: Option<u32>,
    #[serde(default)]
    neutral_count: Option<u32>,
    #[serde(default)]
    negative_count: Option<u32>,
    #[serde(default)]
    review_count: Option<u32>,
}

/// Ids arrive as JSON numbers, occasionally as numeric strings.
fn deserialize_external_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

impl From<RawScoreSummary> for ScoreSummary {
    fn from(raw: RawScoreSummary) -> Self {
        Self {
            score: raw.score,
            max_score: raw.max.unwrap_or_default(),
            sentiment: raw.sentiment.unwrap_or_default(),
            review_counts: ReviewCounts {
                positive: raw.positive_count.unwrap_or(0),
                neutral: raw.neutral_count.unwrap_or(0),
                negative: raw.negative_count.unwrap_or(0),
                total: raw.review_count.unwrap_or(0),
            },
        }
    }
}

impl RawSearchItem {
    fn into_candidate(self, query: &str) -> Option<SearchCandidate> {
        let kind = match RecordKind::try_from(self.type_id) {
            Ok(kind) => kind,
            Err(type_id) => {
                debug!(type_id, title = %self.title, "Skipping search item of unknown kind");
                return None;
            }
        };

        let is_editors_pick = self.must_see.unwrap_or(false)
            || self.must_watch.unwrap_or(false)
            || self.must_play.unwrap_or(false);
        let similarity = similarity(&self.title, query);

        Some(SearchCandidate {
            external_id: self.id,
            kind,
            title: self.title,
            slug: self.slug,
            is_editors_pick,
            critic_score: self.critic_score_summary.and_then(|s| s.score),
            similarity,
        })
    }
}

// ============================================================================
// Public decoding
// ============================================================================

/// Decode a search response into candidates scored against `query`.
///
/// Candidates with similarity strictly below `min_similarity` are dropped.
/// With `sort_by_similarity` the result is stable-sorted best first,
/// otherwise source order is kept.
pub fn parse_search_response(
    body: &str,
    query: &str,
    min_similarity: f64,
    sort_by_similarity: bool,
) -> Result<Vec<SearchCandidate>, DecodeError> {
    let bag = ComponentBag::parse(body)?;
    let data: SearchData = bag.project(SEARCH_COMPONENT)?;

    let mut candidates: Vec<SearchCandidate> = data
        .items
        .into_iter()
        .filter_map(|item| item.into_candidate(query))
        .filter(|c| c.similarity >= min_similarity)
        .collect();

    if sort_by_similarity {
        candidates.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    }

    Ok(candidates)
}

/// Decode a detail response. `is_editors_pick` is taken as given.
pub fn parse_detail_response(
    body: &str,
    is_editors_pick: bool,
) -> Result<DetailRecord, DecodeError> {
    let bag = ComponentBag::parse(body)?;
    let product: ItemData<RawProduct> = bag.project(PRODUCT_COMPONENT)?;
    let critic: ItemData<RawScoreSummary> = bag.project(CRITIC_SCORE_COMPONENT)?;
    let user: ItemData<RawScoreSummary> = bag.project(USER_SCORE_COMPONENT)?;

    let product = product.item;
    let kind =
        RecordKind::try_from(product.type_id).map_err(|type_id| DecodeError::InvalidComponent {
            component: PRODUCT_COMPONENT,
            reason: format!("unknown typeId {}", type_id),
        })?;

    Ok(DetailRecord {
        external_id: product.id,
        kind,
        title: product.title,
        slug: product.slug,
        is_editors_pick,
        user_score: user.item.into(),
        critic_score: critic.item.into(),
    })
}

/// Like [`parse_search_response`], but failures are logged and yield an empty list.
pub fn decode_search_response(
    body: &str,
    query: &str,
    min_similarity: f64,
    sort_by_similarity: bool,
) -> Vec<SearchCandidate> {
    parse_search_response(body, query, min_similarity, sort_by_similarity).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to decode search response");
        Vec::new()
    })
}

/// Like [`parse_detail_response`], but failures are logged and yield `None`.
pub fn decode_detail_response(body: &str, is_editors_pick: bool) -> Option<DetailRecord> {
    match parse_detail_response(body, is_editors_pick) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "Failed to decode detail response");
            None
        }
    }
}
