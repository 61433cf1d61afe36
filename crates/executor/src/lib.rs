//! Trade execution against an injected settlement capability.
//!
//! The executor never lets a settlement failure escape as an error: every
//! invocation produces exactly one ledger entry whose outcome says what
//! happened.

pub mod error;
pub mod executor;
pub mod settlement;

pub use error::*;
pub use executor::*;
pub use settlement::*;
