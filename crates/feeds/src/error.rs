//! Error types for price fetching.

use thiserror::Error;

/// Errors from a single price fetch against a single source.
///
/// All variants are recoverable at the aggregator: a failed source is
/// simply absent from the round's snapshot, never fatal to the process.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("source unreachable: {0}")]
    NetworkUnavailable(String),

    #[error("fetch timed out")]
    Timeout,

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("response lacks a numeric 'price' field")]
    MissingField,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() || err.is_request() {
            FetchError::NetworkUnavailable(err.to_string())
        } else {
            FetchError::BadResponse(err.to_string())
        }
    }
}
