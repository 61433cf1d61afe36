//! One aggregate -> detect -> (execute) cycle.

use dexwatch_core::{FixedPoint, Opportunity, PriceSnapshot, SourceRegistry, Token, TradeRecord};
use dexwatch_engine::detect;
use dexwatch_executor::TradeExecutor;
use dexwatch_feeds::{PriceAggregator, QuoteTransport};
use serde::Serialize;

/// Everything one round produced, for presentation.
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    pub snapshot: PriceSnapshot,
    pub opportunity: Option<Opportunity>,
    pub trade: Option<TradeRecord>,
}

/// Run one complete round for a (token, amount) request.
///
/// Per-source failures never abort the round; a round with no usable
/// quotes simply carries no opportunity. Cancelling this future abandons
/// the in-flight fetches and appends nothing to the ledger.
pub async fn run_round<T: QuoteTransport>(
    aggregator: &PriceAggregator<T>,
    executor: &TradeExecutor,
    registry: &SourceRegistry,
    token: &Token,
    amount: FixedPoint,
) -> Round {
    let snapshot = aggregator.aggregate(registry, token).await;
    let opportunity = detect(&snapshot);

    let trade = match &opportunity {
        Some(opp) => Some(executor.execute(opp, token, amount).await),
        None => None,
    };

    Round {
        snapshot,
        opportunity,
        trade,
    }
}
