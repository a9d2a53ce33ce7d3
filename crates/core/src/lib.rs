pub mod config;
pub mod http;
pub mod metacritic;
pub mod similarity;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, ClientConfig,
    Config, ConfigError, LogConfig,
};
pub use http::{
    HttpFetcher, HttpRequest, HttpResponse, ReqwestFetcher, RotatingUserAgent, StaticUserAgent,
    TransportError, UserAgentSource,
};
pub use metacritic::{
    decode_detail_response, decode_search_response, DecodeError, DetailRecord, MetacriticClient,
    MetacriticError, RecordKind, ReviewCounts, ScoreSummary, SearchCandidate,
};
pub use similarity::similarity;
