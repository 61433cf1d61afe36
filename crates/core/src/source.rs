//! Quote source identities and the registry built from configuration.

use crate::ConfigError;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use url::Url;

/// An external price-quoting endpoint.
///
/// Immutable once registered; lives for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    name: CompactString,
    endpoint: String,
}

impl Source {
    /// Source name, unique within a registry.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URI for price queries against this source.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Ordered name -> endpoint mapping, built once at configuration load.
///
/// Iteration order is registration order, which downstream min/max
/// tie-breaking relies on. Read-only to the engine after startup; no
/// locking needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source, or replace the endpoint of an already-registered name
    /// in place (the source keeps its original position).
    ///
    /// The endpoint must be a non-empty absolute http(s) URL; anything else
    /// is a `ConfigError` at registration time, not a silent skip.
    pub fn register(&mut self, name: &str, endpoint: &str) -> Result<(), ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptySourceName);
        }
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint {
                source: name.to_string(),
            });
        }

        let url = Url::parse(endpoint).map_err(|e| ConfigError::MalformedEndpoint {
            source: name.to_string(),
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::MalformedEndpoint {
                source: name.to_string(),
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let source = Source {
            name: CompactString::new(name),
            endpoint: endpoint.to_string(),
        };
        match self.sources.iter_mut().find(|s| s.name == source.name) {
            Some(existing) => *existing = source,
            None => self.sources.push(source),
        }
        Ok(())
    }

    /// All registered sources in registration order.
    pub fn all(&self) -> &[Source] {
        &self.sources
    }

    /// Look up a source by name.
    pub fn get(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
