//! Neo4j schema initialization.

use anyhow::Result;
use neo4rs::Query;
use tracing::info;

use crate::GraphClient;

/// Cypher statements for schema initialization.
const SCHEMA_STATEMENTS: &[&str] = &[
    // Concurrent units MERGE shared words; the constraint keeps them single.
    "CREATE CONSTRAINT word_unique IF NOT EXISTS FOR (w:Word) REQUIRE w.word IS UNIQUE",
];

/// Initialize Neo4j schema with constraints.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> Result<()> {
    info!("Initializing Neo4j schema...");

    for statement in SCHEMA_STATEMENTS {
        client.execute(Query::new(statement.to_string())).await?;
    }

    info!("Neo4j schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}
