//! Configuration flags and their resolution into a [`SyncConfig`].

use std::path::PathBuf;

use clap::Args;
use wordgraph_core::{SyncConfig, SyncResult, WeightPolicy};

/// Connection and scheduling settings. Every flag can also be set through
/// its environment variable or the `--config` TOML file.
#[derive(Args, Debug, Default, Clone)]
pub struct SettingsArgs {
    /// TOML configuration file
    #[arg(long, global = true, env = "WORDGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Redis URL holding the source hashes
    #[arg(long, global = true, env = "WORDGRAPH_CACHE_URL")]
    pub cache_url: Option<String>,

    /// Hash mapping each word to its related words
    #[arg(long, global = true, env = "WORDGRAPH_RELATIONS_MAP")]
    pub relations_map: Option<String>,

    /// Hash mapping each word to its usage observations
    #[arg(long, global = true, env = "WORDGRAPH_FREQUENCIES_MAP")]
    pub frequencies_map: Option<String>,

    /// Neo4j bolt URI
    #[arg(long, global = true, env = "NEO4J_URI")]
    pub neo4j_uri: Option<String>,

    /// Neo4j database name
    #[arg(long, global = true, env = "NEO4J_DATABASE")]
    pub neo4j_database: Option<String>,

    /// Neo4j user
    #[arg(long, global = true, env = "NEO4J_USER")]
    pub neo4j_user: Option<String>,

    /// Neo4j password
    #[arg(long, global = true, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub neo4j_password: Option<String>,

    /// Send credentials to Neo4j (true/false)
    #[arg(long, global = true, env = "WORDGRAPH_AUTH")]
    pub auth: Option<bool>,

    /// Seconds to wait after a pass before starting the next one
    #[arg(long, global = true, env = "WORDGRAPH_INTERVAL_SECS")]
    pub interval_secs: Option<u64>,

    /// Keys synchronized concurrently within a pass
    #[arg(long, global = true, env = "WORDGRAPH_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Seconds before one key's unit of work is abandoned
    #[arg(long, global = true, env = "WORDGRAPH_UNIT_TIMEOUT_SECS")]
    pub unit_timeout_secs: Option<u64>,

    /// Weight handling for existing edges (refresh, keep-first)
    #[arg(long, global = true, env = "WORDGRAPH_WEIGHT_POLICY")]
    pub weight_policy: Option<WeightPolicy>,

    /// Connection attempts before giving up
    #[arg(long, global = true, env = "WORDGRAPH_RETRY_ATTEMPTS")]
    pub retry_attempts: Option<u32>,

    /// Milliseconds between connection attempts
    #[arg(long, global = true, env = "WORDGRAPH_RETRY_DELAY_MS")]
    pub retry_delay_ms: Option<u64>,
}

impl SettingsArgs {
    /// Load the config file (if any), apply flags and environment, validate.
    pub fn resolve(&self) -> SyncResult<SyncConfig> {
        let base = match &self.config {
            Some(path) => SyncConfig::from_file(path)?,
            None => SyncConfig::default(),
        };

        let mut config = self.apply_to(base);
        if self.cache_url.is_none() {
            if let Ok(url) = std::env::var("REDIS_URL") {
                config.cache.url = url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Overlay every flag that was given onto `config`.
    pub fn apply_to(&self, mut config: SyncConfig) -> SyncConfig {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set(&mut config.cache.url, &self.cache_url);
        set(&mut config.cache.relations_map, &self.relations_map);
        set(&mut config.cache.frequencies_map, &self.frequencies_map);

        set(&mut config.graph.uri, &self.neo4j_uri);
        set(&mut config.graph.database, &self.neo4j_database);
        set(&mut config.graph.auth_enabled, &self.auth);
        if self.neo4j_user.is_some() {
            config.graph.user = self.neo4j_user.clone();
        }
        if self.neo4j_password.is_some() {
            config.graph.password = self.neo4j_password.clone();
        }

        set(&mut config.schedule.interval_secs, &self.interval_secs);
        set(&mut config.schedule.concurrency, &self.concurrency);
        set(&mut config.schedule.unit_timeout_secs, &self.unit_timeout_secs);
        set(&mut config.schedule.weight_policy, &self.weight_policy);

        set(&mut config.retry.max_attempts, &self.retry_attempts);
        set(&mut config.retry.delay_ms, &self.retry_delay_ms);

        config
    }
}
