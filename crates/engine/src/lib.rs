//! Opportunity detection over aggregated price snapshots.

pub mod detector;

pub use detector::*;
