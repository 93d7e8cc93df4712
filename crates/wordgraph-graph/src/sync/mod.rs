//! Transactional [`GraphStore`] over Neo4j.
//!
//! Every key's unit runs in its own explicit transaction: all `Word` merges
//! first, then the `RELATED_TO` merges that match them.

pub mod word_sync;

use async_trait::async_trait;
use neo4rs::Txn;
use tracing::{debug, warn};

use wordgraph_core::error::{SyncError, SyncResult};
use wordgraph_core::relation::{KeyUnit, WeightPolicy};
use wordgraph_core::store::{GraphStore, UnitStats};

use crate::client::{GraphClient, GRAPH_TARGET};

/// Writes key units to Neo4j.
#[derive(Clone)]
pub struct Neo4jStore {
    client: GraphClient,
}

impl Neo4jStore {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GraphClient {
        &self.client
    }
}

/// Whether a neo4rs error means the server cannot be reached.
pub fn is_transport_error(err: &neo4rs::Error) -> bool {
    matches!(err, neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError)
}

fn classify(key: &str, err: neo4rs::Error) -> SyncError {
    if is_transport_error(&err) {
        SyncError::connection(GRAPH_TARGET, err.to_string())
    } else {
        SyncError::transaction(key, err)
    }
}

async fn run_unit(txn: &mut Txn, unit: &KeyUnit, now: &str, policy: WeightPolicy) -> Result<(), neo4rs::Error> {
    for word in &unit.words {
        txn.run(word_sync::upsert_word(word, now)).await?;
    }
    for edge in &unit.edges {
        txn.run(word_sync::upsert_edge(edge, now, policy)).await?;
    }
    Ok(())
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn apply_unit(&self, unit: &KeyUnit, policy: WeightPolicy) -> SyncResult<UnitStats> {
        let now = unit.timestamp();
        let mut txn = self
            .client
            .inner()
            .start_txn()
            .await
            .map_err(|e| classify(&unit.key, e))?;

        if let Err(err) = run_unit(&mut txn, unit, &now, policy).await {
            if let Err(rollback) = txn.rollback().await {
                warn!(key = %unit.key, error = %rollback, "Rollback failed");
            }
            return Err(classify(&unit.key, err));
        }

        txn.commit().await.map_err(|e| classify(&unit.key, e))?;
        debug!(key = %unit.key, words = unit.words.len(), edges = unit.edges.len(), "Committed unit");

        Ok(UnitStats {
            nodes_upserted: unit.words.len(),
            relationships_upserted: unit.edges.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_failure_is_connection_loss() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = classify("apple", neo4rs::Error::from(io));
        assert!(err.is_connection_loss());
    }
}
