//! Price feeds: per-source HTTP fetching and concurrent aggregation.
//!
//! One round of aggregation fans a fetch out to every registered source,
//! tolerates any subset of them failing, and assembles the survivors into a
//! `PriceSnapshot`.

pub mod aggregator;
pub mod error;
pub mod fetcher;

pub use aggregator::*;
pub use error::*;
pub use fetcher::*;
