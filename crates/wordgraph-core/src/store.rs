//! Write side of a pass: the graph store.

use async_trait::async_trait;

use crate::error::SyncResult;
use crate::relation::{KeyUnit, WeightPolicy};

/// Counts reported by the store for one committed unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitStats {
    pub nodes_upserted: usize,
    pub relationships_upserted: usize,
}

/// A graph store that accepts idempotent node and edge upserts.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Apply every upsert in `unit` inside one transaction.
    ///
    /// Either all of the unit is committed or none of it is. A rejected unit
    /// surfaces as `SyncError::Transaction`; a lost handle as
    /// `SyncError::Connection`.
    async fn apply_unit(&self, unit: &KeyUnit, policy: WeightPolicy) -> SyncResult<UnitStats>;
}
