//! Metacritic ratings client.
//!
//! Metacritic has no public API. Its website talks to a "composer"
//! backend that returns pages as bags of tagged components, authorized by
//! an `apiKey` embedded in the homepage. This module scrapes that key,
//! issues search and detail requests, and decodes the responses into
//! typed records.

mod client;
mod decoder;
mod token;
mod types;

pub use client::MetacriticClient;
pub use decoder::{
    decode_detail_response, decode_search_response, parse_detail_response,
    parse_search_response, DecodeError,
};
pub use token::{extract_access_token, TokenBootstrapper};
pub use types::*;

use thiserror::Error;

use crate::http::TransportError;

/// Errors that can occur while looking up ratings.
///
/// The public lookup operations recover from all of these and return an
/// empty result; the `try_*` variants surface them.
#[derive(Debug, Error)]
pub enum MetacriticError {
    /// Response could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Request could not be completed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Remote answered with a non-success status.
    #[error("Unexpected HTTP status {status} from {endpoint}")]
    Status { status: u16, endpoint: &'static str },

    /// No detail endpoint exists for this numeric kind.
    #[error("Unsupported record type for detail request: {0}")]
    UnsupportedKind(u32),

    /// No script on the homepage contained an access token.
    #[error("Failed to retrieve access token from homepage")]
    NoToken,
}
