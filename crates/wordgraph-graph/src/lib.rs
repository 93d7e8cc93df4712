//! # Wordgraph Graph
//!
//! Neo4j side of wordgraph: the connection client, schema setup, and the
//! transactional writer the sync engine commits units through.

pub mod client;
pub mod schema;
pub mod sync;

pub use client::{GRAPH_TARGET, GraphClient, GraphCounts};
pub use sync::Neo4jStore;
