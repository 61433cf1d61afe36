//! Core data types for the dexwatch price-aggregation engine.

pub mod error;
pub mod opportunity;
pub mod price;
pub mod source;
pub mod token;
pub mod trade;

pub use error::*;
pub use opportunity::*;
pub use price::*;
pub use source::*;
pub use token::*;
pub use trade::*;

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
