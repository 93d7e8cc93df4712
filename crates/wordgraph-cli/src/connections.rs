//! The two long-lived handles a wordgraph process holds.

use tracing::info;
use tokio_util::sync::CancellationToken;

use wordgraph_cache::{CACHE_TARGET, CachePool, RedisSource, init_pool};
use wordgraph_core::{ConnectionManager, SyncConfig, SyncEngine, SyncOptions, SyncResult};
use wordgraph_graph::{GRAPH_TARGET, GraphClient, Neo4jStore};

/// Engine type used by the commands.
pub type WordEngine = SyncEngine<RedisSource, Neo4jStore>;

/// Owns the cache and graph handles for the life of a command.
pub struct Connections {
    config: SyncConfig,
    cache: ConnectionManager<CachePool>,
    graph: ConnectionManager<GraphClient>,
}

impl Connections {
    /// Acquire both handles under the configured retry policy.
    pub async fn open(config: &SyncConfig, shutdown: &CancellationToken) -> SyncResult<Self> {
        let cache = Self::open_cache(config, shutdown).await?;
        let graph = Self::open_graph(config, shutdown).await?;
        Ok(Self {
            config: config.clone(),
            cache,
            graph,
        })
    }

    /// Acquire only the cache handle.
    pub async fn open_cache(
        config: &SyncConfig,
        shutdown: &CancellationToken,
    ) -> SyncResult<ConnectionManager<CachePool>> {
        let url = config.cache.url.as_str();
        ConnectionManager::connect(CACHE_TARGET, &config.retry, shutdown, move |_| init_pool(url)).await
    }

    /// Acquire only the graph handle.
    pub async fn open_graph(
        config: &SyncConfig,
        shutdown: &CancellationToken,
    ) -> SyncResult<ConnectionManager<GraphClient>> {
        let graph_config = &config.graph;
        ConnectionManager::connect(GRAPH_TARGET, &config.retry, shutdown, move |_| async move {
            GraphClient::connect(graph_config)
                .await
                .map_err(|e| format!("{:#}", e))
        })
        .await
    }

    pub fn graph(&self) -> SyncResult<&GraphClient> {
        self.graph.handle()
    }

    /// Build an engine over clones of the held handles.
    pub fn engine(&self) -> SyncResult<WordEngine> {
        let source = RedisSource::new(self.cache.handle()?.clone(), &self.config.cache);
        let store = Neo4jStore::new(self.graph.handle()?.clone());
        Ok(SyncEngine::new(source, store, SyncOptions::from(&self.config.schedule)))
    }

    /// Drop both handles and acquire them again.
    pub async fn reconnect(&mut self, shutdown: &CancellationToken) -> SyncResult<()> {
        self.close();
        info!("Reconnecting");
        self.cache = Self::open_cache(&self.config, shutdown).await?;
        self.graph = Self::open_graph(&self.config, shutdown).await?;
        Ok(())
    }

    /// Release both handles. Safe to call more than once.
    pub fn close(&mut self) {
        self.cache.close();
        self.graph.close();
    }
}
