//! Error types for settlement operations.

use thiserror::Error;

/// Errors a settlement implementation may report.
///
/// Recoverable per trade: the executor converts any of these into a
/// `Failed` trade outcome rather than propagating them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettlementError {
    #[error("settlement rejected: {0}")]
    Rejected(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("node unavailable: {0}")]
    NodeUnavailable(String),

    #[error("settlement timed out: {0}")]
    Timeout(String),
}
