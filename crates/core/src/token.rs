//! Token identifiers.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token being priced: a symbol or contract address, opaque to the engine.
///
/// The engine validates nothing beyond non-emptiness; whether the string is
/// meaningful is up to the quote sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(CompactString);

impl Token {
    /// Create a token identifier. Returns `None` if the input is empty or
    /// whitespace-only.
    pub fn new(id: &str) -> Option<Self> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(CompactString::new(trimmed)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
