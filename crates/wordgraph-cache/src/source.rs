//! [`SourceReader`] backed by two Redis hashes.

use async_trait::async_trait;
use tracing::debug;

use wordgraph_core::config::CacheConfig;
use wordgraph_core::error::SyncResult;
use wordgraph_core::source::{aggregate_frequency, decode_relations, SourceReader};

use crate::client::CachePool;
use crate::queries::{frequencies, relations};

/// Reads relations and frequencies from the configured hashes.
#[derive(Clone)]
pub struct RedisSource {
    pool: CachePool,
    relations_map: String,
    frequencies_map: String,
}

impl RedisSource {
    pub fn new(pool: CachePool, config: &CacheConfig) -> Self {
        Self {
            pool,
            relations_map: config.relations_map.clone(),
            frequencies_map: config.frequencies_map.clone(),
        }
    }

    pub fn relations_map(&self) -> &str {
        &self.relations_map
    }

    pub fn frequencies_map(&self) -> &str {
        &self.frequencies_map
    }
}

#[async_trait]
impl SourceReader for RedisSource {
    async fn enumerate_keys(&self) -> SyncResult<Vec<String>> {
        let words = relations::list_words(&self.pool, &self.relations_map).await?;
        debug!(map = %self.relations_map, words = words.len(), "Enumerated source words");
        Ok(words)
    }

    async fn get_relations(&self, key: &str) -> SyncResult<Option<Vec<String>>> {
        let raw = relations::get_related_raw(&self.pool, &self.relations_map, key).await?;
        raw.map(|r| decode_relations(key, &r)).transpose()
    }

    async fn get_frequency(&self, key: &str) -> SyncResult<i64> {
        let raw = frequencies::get_observations_raw(&self.pool, &self.frequencies_map, key).await?;
        Ok(aggregate_frequency(key, raw.as_deref()))
    }
}
