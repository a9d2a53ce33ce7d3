//! Domain records for ratings lookups.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Kind of reviewed product.
///
/// Serialized under the same names `Display` prints and `FromStr` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[serde(rename = "tv")]
    TvShow,
    Movie,
    Game,
}

impl RecordKind {
    /// Upstream numeric type identifier (`typeId` / `mcoTypeId`).
    pub fn type_id(self) -> u32 {
        match self {
            RecordKind::TvShow => 1,
            RecordKind::Movie => 2,
            RecordKind::Game => 13,
        }
    }

    /// Path segment of the kind's detail endpoint.
    pub fn detail_segment(self) -> &'static str {
        match self {
            RecordKind::TvShow => "shows",
            RecordKind::Movie => "movies",
            RecordKind::Game => "games",
        }
    }
}

impl TryFrom<u32> for RecordKind {
    type Error = u32;

    fn try_from(type_id: u32) -> Result<Self, Self::Error> {
        match type_id {
            1 => Ok(RecordKind::TvShow),
            2 => Ok(RecordKind::Movie),
            13 => Ok(RecordKind::Game),
            other => Err(other),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::TvShow => "tv",
            RecordKind::Movie => "movie",
            RecordKind::Game => "game",
        };
        f.write_str(s)
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tv" | "show" | "tvshow" | "tv_show" => Ok(RecordKind::TvShow),
            "movie" => Ok(RecordKind::Movie),
            "game" => Ok(RecordKind::Game),
            other => Err(format!("Unknown record kind: {}", other)),
        }
    }
}

/// A search hit, scored against the query that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCandidate {
    pub external_id: u64,
    pub kind: RecordKind,
    pub title: String,
    pub slug: String,
    pub is_editors_pick: bool,
    /// Critic score, `None` when the title has not been scored yet.
    pub critic_score: Option<f64>,
    /// Title similarity to the query, in `[0, 1]`.
    pub similarity: f64,
}

/// Full ratings for a single product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    pub external_id: u64,
    pub kind: RecordKind,
    pub title: String,
    pub slug: String,
    /// Carried over from the search candidate that resolved the slug.
    pub is_editors_pick: bool,
    pub user_score: ScoreSummary,
    pub critic_score: ScoreSummary,
}

/// Score block as published upstream. Values are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub score: Option<f64>,
    pub max_score: f64,
    pub sentiment: String,
    pub review_counts: ReviewCounts,
}

/// Review bucket counts. `total` is not guaranteed to equal the sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewCounts {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
    pub total: u32,
}

/// Access token scraped from the homepage.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
