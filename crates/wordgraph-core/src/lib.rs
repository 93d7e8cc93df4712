//! # Wordgraph Core
//!
//! Incremental synchronization of a word-association dataset into a
//! weighted, undirected graph.
//!
//! The engine is storage-agnostic: it reads through [`SourceReader`] and
//! writes through [`GraphStore`]. The Redis and Neo4j implementations live in
//! `wordgraph-cache` and `wordgraph-graph`.

pub mod config;
pub mod connection;
pub mod error;
pub mod relation;
pub mod schedule;
pub mod source;
pub mod store;
pub mod sync;

#[cfg(test)]
mod testing;

pub use config::{CacheConfig, GraphConfig, ScheduleConfig, SyncConfig};
pub use connection::{ConnectionManager, RetryPolicy, retry_connect};
pub use error::{SyncError, SyncResult};
pub use relation::{CanonicalEdge, KeyUnit, WeightPolicy, canonicalize, weight};
pub use schedule::Scheduler;
pub use source::SourceReader;
pub use store::{GraphStore, UnitStats};
pub use sync::{KeyOutcome, PassSummary, SkipReason, SyncEngine, SyncOptions};
