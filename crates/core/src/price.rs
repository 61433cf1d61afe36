//! Price representation and per-round quote collections.

use crate::Token;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Fixed-point number with 8 decimal places.
/// Used for precise price representation without floating-point errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FixedPoint(pub u64);

impl FixedPoint {
    /// Number of decimal places (8 for price precision)
    pub const DECIMALS: u32 = 8;
    /// Scale factor: 10^8 (fits comfortably in u64 for most prices)
    pub const SCALE: u64 = 100_000_000;

    pub const ZERO: FixedPoint = FixedPoint(0);

    /// Create from f64 (for testing/convenience, not recommended for production)
    pub fn from_f64(value: f64) -> Self {
        Self((value * Self::SCALE as f64) as u64)
    }

    /// Checked conversion from f64. Returns `None` for non-finite or
    /// negative values, and for values too large for the fixed-point range.
    pub fn try_from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let scaled = value * Self::SCALE as f64;
        if scaled > u64::MAX as f64 {
            return None;
        }
        Some(Self(scaled as u64))
    }

    /// Convert to f64 (for display/debugging)
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Calculate spread in basis points: (sell - buy) / buy * 10000
    pub fn spread_bps(buy: FixedPoint, sell: FixedPoint) -> i32 {
        if buy.0 == 0 {
            return 0;
        }
        let diff = sell.0 as i128 - buy.0 as i128;
        ((diff * 10000) / buy.0 as i128) as i32
    }
}

impl Add for FixedPoint {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for FixedPoint {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

/// One successful price observation from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Source the price was observed at
    pub source: CompactString,
    /// Quoted price
    pub price: FixedPoint,
    /// Timestamp of the fetch in milliseconds
    pub fetched_at_ms: u64,
}

impl PriceQuote {
    /// Create a quote stamped with the current time.
    pub fn new(source: &str, price: FixedPoint) -> Self {
        Self {
            source: CompactString::new(source),
            price,
            fetched_at_ms: crate::now_ms(),
        }
    }
}

/// All quotes collected for one token in one aggregation round.
///
/// Quotes are keyed by source name and iterate in source registration
/// order, never in fetch-completion order. Sources that failed to produce
/// a price are simply absent. Immutable once the round is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    token: Token,
    quotes: Vec<PriceQuote>,
}

impl PriceSnapshot {
    /// Create an empty snapshot for a token.
    pub fn new(token: Token) -> Self {
        Self {
            token,
            quotes: Vec::new(),
        }
    }

    /// Token this snapshot was collected for.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Add a quote, replacing any earlier quote from the same source.
    pub fn insert(&mut self, quote: PriceQuote) {
        match self.quotes.iter_mut().find(|q| q.source == quote.source) {
            Some(existing) => *existing = quote,
            None => self.quotes.push(quote),
        }
    }

    /// Look up the quote for a source, if that source produced one.
    pub fn get(&self, source: &str) -> Option<&PriceQuote> {
        self.quotes.iter().find(|q| q.source == source)
    }

    /// Iterate quotes in source registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PriceQuote> {
        self.quotes.iter()
    }

    /// Number of sources that produced a quote this round.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token() -> Token {
        Token::new("ETH").unwrap()
    }

    // === Fixed-point tests ===

    #[test]
    fn test_fixed_point_conversion() {
        let one = FixedPoint::from_f64(1.0);
        assert_eq!(one.0, 100_000_000u64);

        let price = FixedPoint::from_f64(50000.5);
        assert_eq!(price.to_f64(), 50000.5);
    }

    #[test]
    fn test_fixed_point_try_from_f64() {
        assert_eq!(
            FixedPoint::try_from_f64(2.5),
            Some(FixedPoint::from_f64(2.5))
        );
        assert_eq!(FixedPoint::try_from_f64(0.0), Some(FixedPoint::ZERO));
        assert_eq!(FixedPoint::try_from_f64(-1.0), None);
        assert_eq!(FixedPoint::try_from_f64(f64::NAN), None);
        assert_eq!(FixedPoint::try_from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_fixed_point_arithmetic() {
        let a = FixedPoint::from_f64(100.0);
        let b = FixedPoint::from_f64(50.0);

        assert_eq!((a + b).to_f64(), 150.0);
        assert_eq!((a - b).to_f64(), 50.0);
        // Both directions saturate instead of wrapping
        assert_eq!(b - a, FixedPoint::ZERO);
        assert_eq!(FixedPoint(u64::MAX) + a, FixedPoint(u64::MAX));
    }

    #[test]
    fn test_fixed_point_spread_bps() {
        let buy = FixedPoint::from_f64(100.0);
        let sell = FixedPoint::from_f64(101.0);

        // (101 - 100) / 100 * 10000 = 100 bps (1%)
        assert_eq!(FixedPoint::spread_bps(buy, sell), 100);
        // Inverted direction is negative
        assert_eq!(FixedPoint::spread_bps(sell, buy), -99);
        // Zero buy price never divides
        assert_eq!(FixedPoint::spread_bps(FixedPoint::ZERO, sell), 0);
    }

    // === PriceSnapshot tests ===

    #[test]
    fn test_snapshot_insert_and_get() {
        let mut snapshot = PriceSnapshot::new(token());
        snapshot.insert(PriceQuote::new("uniswap", FixedPoint::from_f64(10.0)));
        snapshot.insert(PriceQuote::new("sushiswap", FixedPoint::from_f64(12.0)));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.get("uniswap").unwrap().price,
            FixedPoint::from_f64(10.0)
        );
        assert!(snapshot.get("curve").is_none());
    }

    #[test]
    fn test_snapshot_insert_replaces_same_source() {
        let mut snapshot = PriceSnapshot::new(token());
        snapshot.insert(PriceQuote::new("uniswap", FixedPoint::from_f64(10.0)));
        snapshot.insert(PriceQuote::new("uniswap", FixedPoint::from_f64(11.0)));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.get("uniswap").unwrap().price,
            FixedPoint::from_f64(11.0)
        );
    }

    #[test]
    fn test_snapshot_iteration_preserves_insertion_order() {
        let mut snapshot = PriceSnapshot::new(token());
        for name in ["c", "a", "b"] {
            snapshot.insert(PriceQuote::new(name, FixedPoint::from_f64(1.0)));
        }

        let order: Vec<&str> = snapshot.iter().map(|q| q.source.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_snapshot_empty() {
        let snapshot = PriceSnapshot::new(token());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
    }
}
