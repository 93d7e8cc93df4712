//! Neo4j connection client.

use anyhow::{Context, Result};
use neo4rs::{ConfigBuilder, Graph, Query};

use wordgraph_core::config::GraphConfig;

/// Target name used in logs and connection errors.
pub const GRAPH_TARGET: &str = "neo4j";

/// Client for the word graph in Neo4j.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// neo4rs pools are lazy: `Graph::connect` does not open a bolt
    /// connection. The `RETURN 1` ping forces the handshake so an unreachable
    /// server fails here instead of on the first pass.
    ///
    /// With authentication disabled the server ignores credentials, so empty
    /// ones are sent.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let (user, password) = if config.auth_enabled {
            (
                config.user.as_deref().unwrap_or_default(),
                config.password.as_deref().unwrap_or_default(),
            )
        } else {
            ("", "")
        };

        let neo4j_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(user)
            .password(password)
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(500)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .with_context(|| format!("Neo4j at {} is not responding to queries", config.uri))?;

        Ok(Self { graph })
    }

    /// Run a statement whose result rows are not needed.
    pub async fn execute(&self, query: Query) -> Result<()> {
        self.graph
            .run(query)
            .await
            .context("Neo4j statement failed")
    }

    /// Word and relationship counts for status display.
    pub async fn get_counts(&self) -> Result<GraphCounts> {
        Ok(GraphCounts {
            words: self.count("MATCH (w:Word) RETURN count(w) AS count").await?,
            relationships: self
                .count("MATCH (:Word)-[r:RELATED_TO]->(:Word) RETURN count(r) AS count")
                .await?,
        })
    }

    /// First `count` column of a counting query; 0 when no row comes back.
    async fn count(&self, cypher: &str) -> Result<usize> {
        let mut rows = self
            .graph
            .execute(Query::new(cypher.to_string()))
            .await
            .with_context(|| format!("Neo4j count failed: {}", cypher))?;

        let Some(row) = rows.next().await.context("Failed to read Neo4j row")? else {
            return Ok(0);
        };
        let count: i64 = row
            .get("count")
            .map_err(|e| anyhow::anyhow!("Count row has no 'count' column: {:?}", e))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Get a reference to the underlying neo4rs Graph.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }
}

/// Word and relationship counts.
#[derive(Debug, Clone, Copy)]
pub struct GraphCounts {
    pub words: usize,
    pub relationships: usize,
}
