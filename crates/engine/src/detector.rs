//! Min/max spread scan over one round's snapshot.

use dexwatch_core::{Opportunity, PriceQuote, PriceSnapshot};
use tracing::debug;

/// Decide whether a snapshot contains a profitable round trip.
///
/// Pure function of its input: no I/O, cannot fail, and the same snapshot
/// always yields the same answer. Buy at the minimum price, sell at the
/// maximum; strict comparisons mean the first quote in source registration
/// order wins price ties, keeping the result deterministic. Fewer than two
/// quotes, or a flat/negative spread, is no opportunity.
pub fn detect(snapshot: &PriceSnapshot) -> Option<Opportunity> {
    if snapshot.len() < 2 {
        return None;
    }

    let mut buy: Option<&PriceQuote> = None;
    let mut sell: Option<&PriceQuote> = None;
    for quote in snapshot.iter() {
        if buy.is_none_or(|q| quote.price < q.price) {
            buy = Some(quote);
        }
        if sell.is_none_or(|q| quote.price > q.price) {
            sell = Some(quote);
        }
    }

    let opportunity = Opportunity::new(buy?, sell?);
    if let Some(opp) = &opportunity {
        debug!(
            "{}: buy {} @ {} / sell {} @ {} ({} bps)",
            snapshot.token(),
            opp.buy_source,
            opp.buy_price.to_f64(),
            opp.sell_source,
            opp.sell_price.to_f64(),
            opp.spread_bps()
        );
    }
    opportunity
}
