//! Configuration errors.
//!
//! Malformed configuration is the only condition that is fatal at startup;
//! everything downstream of registration is recoverable and stays inside the
//! round that hit it.

use std::fmt;

/// Errors raised while building the source registry from configuration.
///
/// Implemented by hand rather than via `thiserror` because the `source`
/// fields hold the source *name*, which the derive would otherwise treat
/// as the error cause.
#[derive(Debug)]
pub enum ConfigError {
    EmptySourceName,

    EmptyEndpoint { source: String },

    MalformedEndpoint {
        source: String,
        endpoint: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptySourceName => {
                write!(f, "source name must not be empty")
            }
            ConfigError::EmptyEndpoint { source } => {
                write!(f, "source '{source}' has an empty endpoint")
            }
            ConfigError::MalformedEndpoint {
                source,
                endpoint,
                reason,
            } => {
                write!(
                    f,
                    "source '{source}' has a malformed endpoint '{endpoint}': {reason}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
