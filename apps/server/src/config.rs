//! Application configuration.

use dexwatch_core::{ConfigError, SourceRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for source endpoints:
/// `DEXWATCH_SOURCE_UNISWAP=https://...` registers (or overrides) the
/// source `uniswap`.
const SOURCE_ENV_PREFIX: &str = "DEXWATCH_SOURCE_";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Quote sources in registration order.
    pub sources: Vec<SourceSettings>,
    /// Node/account connection descriptor, opaque to the engine; handed to
    /// the settlement implementation as-is.
    pub node_url: Option<String>,
    /// Per-fetch timeout in milliseconds.
    pub fetch_timeout_ms: u64,
    /// Logging level.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            node_url: None,
            fetch_timeout_ms: 5_000,
            log_level: "info".to_string(),
        }
    }
}

/// One configured quote source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub name: String,
    pub endpoint: String,
}

impl AppConfig {
    /// Load configuration from a JSON file, falling back to defaults when
    /// the file does not exist, then apply environment overrides.
    pub fn load(path: &str) -> Result<Self, std::io::Error> {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?
        } else {
            Self::default()
        };
        config.apply_env(std::env::vars());
        Ok(config)
    }

    /// Merge `DEXWATCH_SOURCE_*` variables into the source list. An
    /// already-configured name keeps its position with the endpoint
    /// replaced; new names are appended in variable-name order so the
    /// resulting registration order is deterministic.
    fn apply_env(&mut self, vars: impl Iterator<Item = (String, String)>) {
        let mut overrides: Vec<(String, String)> = vars
            .filter_map(|(key, value)| {
                let name = key.strip_prefix(SOURCE_ENV_PREFIX)?;
                if name.is_empty() {
                    return None;
                }
                Some((name.to_lowercase(), value))
            })
            .collect();
        overrides.sort();

        for (name, endpoint) in overrides {
            match self.sources.iter_mut().find(|s| s.name == name) {
                Some(existing) => existing.endpoint = endpoint,
                None => self.sources.push(SourceSettings { name, endpoint }),
            }
        }
    }

    /// Build the source registry. Any empty or malformed endpoint is fatal
    /// here, before the first round runs.
    pub fn build_registry(&self) -> Result<SourceRegistry, ConfigError> {
        let mut registry = SourceRegistry::new();
        for source in &self.sources {
            registry.register(&source.name, &source.endpoint)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_config_default() {
        let config = AppConfig::default();
        assert!(config.sources.is_empty());
        assert_eq!(config.fetch_timeout_ms, 5_000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_parses_partial_json() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "sources": [
                    { "name": "uniswap", "endpoint": "https://uni.example/api" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.fetch_timeout_ms, 5_000);
    }

    #[test]
    fn test_apply_env_appends_new_sources_sorted() {
        let mut config = AppConfig::default();
        config.apply_env(
            env(&[
                ("DEXWATCH_SOURCE_SUSHISWAP", "https://sushi.example"),
                ("HOME", "/home/user"),
                ("DEXWATCH_SOURCE_CURVE", "https://curve.example"),
            ])
            .into_iter(),
        );

        let names: Vec<&str> = config.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["curve", "sushiswap"]);
    }

    #[test]
    fn test_apply_env_overrides_existing_in_place() {
        let mut config = AppConfig::default();
        config.sources.push(SourceSettings {
            name: "uniswap".to_string(),
            endpoint: "https://uni.example/v1".to_string(),
        });
        config.sources.push(SourceSettings {
            name: "curve".to_string(),
            endpoint: "https://curve.example".to_string(),
        });

        config.apply_env(
            env(&[("DEXWATCH_SOURCE_UNISWAP", "https://uni.example/v2")]).into_iter(),
        );

        assert_eq!(config.sources[0].name, "uniswap");
        assert_eq!(config.sources[0].endpoint, "https://uni.example/v2");
        assert_eq!(config.sources.len(), 2);
    }

    #[test]
    fn test_build_registry_rejects_bad_endpoint() {
        let mut config = AppConfig::default();
        config.sources.push(SourceSettings {
            name: "uniswap".to_string(),
            endpoint: "not a url".to_string(),
        });

        assert!(config.build_registry().is_err());
    }

    #[test]
    fn test_build_registry_keeps_config_order() {
        let mut config = AppConfig::default();
        for name in ["c", "a", "b"] {
            config.sources.push(SourceSettings {
                name: name.to_string(),
                endpoint: format!("https://{name}.example"),
            });
        }

        let registry = config.build_registry().unwrap();
        let names: Vec<&str> = registry.all().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
