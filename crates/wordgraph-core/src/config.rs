//! Configuration model shared by every wordgraph crate.
//!
//! Values are layered by the CLI (flag > env > file > default); this module
//! only knows the shape, the defaults and how to validate the result.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::connection::RetryPolicy;
use crate::error::{SyncError, SyncResult};
use crate::relation::WeightPolicy;

/// Default Redis URL.
pub const DEFAULT_CACHE_URL: &str = "redis://127.0.0.1:6379";

/// Default bolt URI.
pub const DEFAULT_GRAPH_URI: &str = "bolt://localhost:7687";

/// Hash holding each word's related words.
pub const DEFAULT_RELATIONS_MAP: &str = "graph_map";

/// Hash holding each word's usage observations.
pub const DEFAULT_FREQUENCIES_MAP: &str = "words_map";

/// Full wordgraph configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub cache: CacheConfig,
    pub graph: GraphConfig,
    pub schedule: ScheduleConfig,
    pub retry: RetryPolicy,
}

/// Where the source mappings live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub url: String,
    pub relations_map: String,
    pub frequencies_map: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CACHE_URL.to_string(),
            relations_map: DEFAULT_RELATIONS_MAP.to_string(),
            frequencies_map: DEFAULT_FREQUENCIES_MAP.to_string(),
        }
    }
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub uri: String,
    pub database: String,
    pub auth_enabled: bool,
    pub user: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub max_connections: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_GRAPH_URI.to_string(),
            database: "neo4j".to_string(),
            auth_enabled: false,
            user: None,
            password: None,
            max_connections: 8,
        }
    }
}

/// Pass scheduling and per-unit limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub interval_secs: u64,
    pub concurrency: usize,
    pub unit_timeout_secs: u64,
    pub weight_policy: WeightPolicy,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            concurrency: 4,
            unit_timeout_secs: 30,
            weight_policy: WeightPolicy::default(),
        }
    }
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn unit_timeout(&self) -> Duration {
        Duration::from_secs(self.unit_timeout_secs)
    }
}

impl SyncConfig {
    /// Parse a TOML document. Missing tables and fields keep their defaults.
    pub fn from_toml_str(raw: &str) -> SyncResult<Self> {
        toml::from_str(raw).map_err(|e| SyncError::configuration(format!("invalid config file: {}", e)))
    }

    /// Load a TOML config file from disk.
    pub fn from_file(path: &Path) -> SyncResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SyncError::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Reject configurations that cannot possibly start.
    pub fn validate(&self) -> SyncResult<()> {
        let url = self.cache.url.trim();
        if url.is_empty() {
            return Err(SyncError::configuration("cache URL is required"));
        }
        if !["redis://", "rediss://", "unix://", "redis+unix://"]
            .iter()
            .any(|scheme| url.starts_with(scheme))
        {
            return Err(SyncError::configuration(format!(
                "cache URL must use a redis:// or rediss:// scheme, got '{}'",
                url
            )));
        }
        if self.cache.relations_map.trim().is_empty() || self.cache.frequencies_map.trim().is_empty() {
            return Err(SyncError::configuration("source map names must not be empty"));
        }

        if self.graph.uri.trim().is_empty() {
            return Err(SyncError::configuration("graph store URI is required"));
        }
        if self.graph.auth_enabled {
            let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
            if !present(&self.graph.user) || !present(&self.graph.password) {
                return Err(SyncError::configuration(
                    "graph store authentication is enabled but user or password is missing",
                ));
            }
        }
        if self.graph.max_connections == 0 {
            return Err(SyncError::configuration("graph max_connections must be at least 1"));
        }

        if self.schedule.interval_secs == 0 {
            return Err(SyncError::configuration("sync interval must be at least one second"));
        }
        if self.schedule.concurrency == 0 {
            return Err(SyncError::configuration("concurrency must be at least 1"));
        }
        if self.schedule.unit_timeout_secs == 0 {
            return Err(SyncError::configuration("unit timeout must be at least one second"));
        }
        if self.retry.max_attempts == 0 {
            return Err(SyncError::configuration("retry attempts must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SyncConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache.relations_map, "graph_map");
        assert_eq!(config.cache.frequencies_map, "words_map");
        assert_eq!(config.schedule.interval(), Duration::from_secs(10));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.delay(), Duration::from_secs(2));
        assert!(!config.graph.auth_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let raw = r#"
            [cache]
            url = "redis://cache:6379"

            [schedule]
            interval_secs = 30
            weight_policy = "keep-first"
        "#;
        let config = SyncConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.cache.url, "redis://cache:6379");
        assert_eq!(config.cache.relations_map, "graph_map");
        assert_eq!(config.schedule.interval_secs, 30);
        assert_eq!(config.schedule.concurrency, 4);
        assert_eq!(config.schedule.weight_policy, WeightPolicy::KeepFirst);
        assert_eq!(config.graph.uri, DEFAULT_GRAPH_URI);
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let err = SyncConfig::from_toml_str("[cache\nurl =").unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
    }

    #[test]
    fn test_missing_cache_url_rejected() {
        let mut config = SyncConfig::default();
        config.cache.url = "  ".to_string();
        assert!(matches!(config.validate(), Err(SyncError::Configuration(_))));
    }

    #[test]
    fn test_non_redis_scheme_rejected() {
        let mut config = SyncConfig::default();
        config.cache.url = "10.0.0.5:5701".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_graph_uri_rejected() {
        let mut config = SyncConfig::default();
        config.graph.uri = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_auth_requires_both_credentials() {
        let mut config = SyncConfig::default();
        config.graph.auth_enabled = true;
        config.graph.user = Some("neo4j".to_string());
        assert!(config.validate().is_err());

        config.graph.password = Some(String::new());
        assert!(config.validate().is_err());

        config.graph.password = Some("secret".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_credentials_ignored_without_auth() {
        let mut config = SyncConfig::default();
        config.graph.user = Some("neo4j".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = SyncConfig::default();
        config.schedule.interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = SyncConfig::default();
        config.schedule.concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = SyncConfig::default();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }
}
