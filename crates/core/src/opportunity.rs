//! Detected cross-source spread.

use crate::{FixedPoint, PriceQuote};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A profitable round trip: buy where the token is cheapest, sell where it
/// is most expensive.
///
/// Only constructible from two quotes with a strictly positive spread, so a
/// value of this type always represents a real (pre-cost) opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub buy_source: CompactString,
    pub sell_source: CompactString,
    pub buy_price: FixedPoint,
    pub sell_price: FixedPoint,
}

impl Opportunity {
    /// Build an opportunity from the cheapest and most expensive quotes of a
    /// round. Returns `None` when the spread is zero or negative, or when
    /// both quotes come from the same source.
    pub fn new(buy: &PriceQuote, sell: &PriceQuote) -> Option<Self> {
        if sell.price <= buy.price || buy.source == sell.source {
            return None;
        }
        Some(Self {
            buy_source: buy.source.clone(),
            sell_source: sell.source.clone(),
            buy_price: buy.price,
            sell_price: sell.price,
        })
    }

    /// Absolute spread: sell price minus buy price. Always positive.
    pub fn spread(&self) -> FixedPoint {
        self.sell_price - self.buy_price
    }

    /// Spread relative to the buy price, in basis points.
    pub fn spread_bps(&self) -> i32 {
        FixedPoint::spread_bps(self.buy_price, self.sell_price)
    }
}
