//! Trade records and the append-only ledger.

use crate::{FixedPoint, Opportunity, Token};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Terminal outcome of one trade attempt.
///
/// Failure is data, not an error: callers reading the ledger see both
/// outcomes through the same channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeOutcome {
    Succeeded,
    Failed(String),
}

impl TradeOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, TradeOutcome::Succeeded)
    }
}

/// Immutable record of one attempted cross-source trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub buy_source: CompactString,
    pub sell_source: CompactString,
    pub token: Token,
    pub amount: FixedPoint,
    pub outcome: TradeOutcome,
    pub executed_at_ms: u64,
}

impl TradeRecord {
    /// Record a settled trade.
    pub fn succeeded(opportunity: &Opportunity, token: &Token, amount: FixedPoint) -> Self {
        Self::with_outcome(opportunity, token, amount, TradeOutcome::Succeeded)
    }

    /// Record a trade that failed with a human-readable reason.
    pub fn failed(
        opportunity: &Opportunity,
        token: &Token,
        amount: FixedPoint,
        reason: impl Into<String>,
    ) -> Self {
        Self::with_outcome(opportunity, token, amount, TradeOutcome::Failed(reason.into()))
    }

    fn with_outcome(
        opportunity: &Opportunity,
        token: &Token,
        amount: FixedPoint,
        outcome: TradeOutcome,
    ) -> Self {
        Self {
            buy_source: opportunity.buy_source.clone(),
            sell_source: opportunity.sell_source.clone(),
            token: token.clone(),
            amount,
            outcome,
            executed_at_ms: crate::now_ms(),
        }
    }
}

/// Append-only, in-memory trade history.
///
/// Appends are serialized behind a lock since overlapping rounds may write
/// concurrently; records are never mutated or removed, and `history()`
/// returns them in append order. Durability beyond the process lifetime is
/// the caller's concern.
#[derive(Debug, Default)]
pub struct TradeLedger {
    records: Mutex<Vec<TradeRecord>>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Called by the trade executor only.
    pub fn append(&self, record: TradeRecord) {
        self.records.lock().unwrap().push(record);
    }

    /// Chronological (append-order) copy of all records.
    pub fn history(&self) -> Vec<TradeRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
