use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Ratings client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Homepage scraped for the access token
    #[serde(default = "default_homepage_url")]
    pub homepage_url: String,
    /// Backend pages root; search and detail endpoints hang off it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Referer sent with backend requests (default: homepage_url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    /// Per-request timeout in seconds (default: 60)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Search candidates scoring below this are discarded (default: 0.5)
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,
    /// Fixed User-Agent; a rotating desktop pool is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            homepage_url: default_homepage_url(),
            base_url: default_base_url(),
            referer: None,
            timeout_secs: default_timeout(),
            min_similarity: default_min_similarity(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn search_url(&self) -> String {
        format!("{}search/", self.base_url)
    }

    pub fn referer(&self) -> &str {
        self.referer.as_deref().unwrap_or(&self.homepage_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs as u64)
    }
}

fn default_homepage_url() -> String {
    "https://www.metacritic.com/".to_string()
}

fn default_base_url() -> String {
    "https://backend.metacritic.com/composer/metacritic/pages/".to_string()
}

fn default_timeout() -> u32 {
    60
}

fn default_min_similarity() -> f64 {
    0.5
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// tracing EnvFilter directive; RUST_LOG takes precedence
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}
