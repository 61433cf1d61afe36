//! Trade execution and ledger accounting.

use crate::settlement::Settlement;
use dexwatch_core::{FixedPoint, Opportunity, Token, TradeLedger, TradeOutcome, TradeRecord};
use std::sync::Arc;
use tracing::{info, warn};

/// Executes detected opportunities through the injected settlement
/// capability and records every attempt.
///
/// Two terminal states per invocation, Succeeded or Failed, both encoded in
/// the returned record; no error channel and no intermediate state between
/// invocations. The record is appended to the ledger before it is returned.
pub struct TradeExecutor {
    settlement: Arc<dyn Settlement>,
    ledger: Arc<TradeLedger>,
}

impl TradeExecutor {
    pub fn new(settlement: Arc<dyn Settlement>, ledger: Arc<TradeLedger>) -> Self {
        Self { settlement, ledger }
    }

    /// Attempt the cross-source round trip described by `opportunity`.
    pub async fn execute(
        &self,
        opportunity: &Opportunity,
        token: &Token,
        amount: FixedPoint,
    ) -> TradeRecord {
        let record = if amount.is_zero() {
            TradeRecord::failed(opportunity, token, amount, "trade amount must be positive")
        } else {
            match self
                .settlement
                .settle(&opportunity.buy_source, &opportunity.sell_source, token, amount)
                .await
            {
                Ok(()) => TradeRecord::succeeded(opportunity, token, amount),
                Err(e) => TradeRecord::failed(opportunity, token, amount, e.to_string()),
            }
        };

        match &record.outcome {
            TradeOutcome::Succeeded => info!(
                "executed trade: {} {} from {} to {}",
                amount.to_f64(),
                token,
                record.buy_source,
                record.sell_source
            ),
            TradeOutcome::Failed(reason) => warn!(
                "trade failed: {} {} from {} to {}: {}",
                amount.to_f64(),
                token,
                record.buy_source,
                record.sell_source,
                reason
            ),
        }

        self.ledger.append(record.clone());
        record
    }
}
