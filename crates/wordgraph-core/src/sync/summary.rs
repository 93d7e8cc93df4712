//! Per-key outcomes and the summary they aggregate into.

use std::time::Duration;

use crate::error::SyncError;
use crate::store::UnitStats;

/// Why a key contributed nothing to a pass without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The relations record was removed between enumeration and read.
    Vanished,
}

/// Result of synchronizing one key.
#[derive(Debug)]
pub enum KeyOutcome {
    Synced { stats: UnitStats, self_loops: usize },
    Skipped(SkipReason),
    Failed(SyncError),
}

/// A key whose unit was abandoned, with the reason.
#[derive(Debug, Clone)]
pub struct KeyFailure {
    pub key: String,
    pub error: String,
}

/// Totals for one full pass.
#[derive(Debug, Clone, Default)]
pub struct PassSummary {
    pub keys_seen: usize,
    pub synced: usize,
    pub skipped: usize,
    pub failed: usize,
    pub self_loops_skipped: usize,
    pub nodes_upserted: usize,
    pub relationships_upserted: usize,
    pub elapsed: Duration,
    pub failures: Vec<KeyFailure>,
}

impl PassSummary {
    pub(crate) fn record(&mut self, key: String, outcome: KeyOutcome) {
        match outcome {
            KeyOutcome::Synced { stats, self_loops } => {
                self.synced += 1;
                self.self_loops_skipped += self_loops;
                self.nodes_upserted += stats.nodes_upserted;
                self.relationships_upserted += stats.relationships_upserted;
            }
            KeyOutcome::Skipped(_) => self.skipped += 1,
            KeyOutcome::Failed(error) => {
                self.failed += 1;
                self.failures.push(KeyFailure {
                    key,
                    error: error.to_string(),
                });
            }
        }
    }

    /// True when every key was synced or deliberately skipped.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    /// Keys that failed, sorted for stable output.
    pub fn failed_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.failures.iter().map(|f| f.key.as_str()).collect();
        keys.sort_unstable();
        keys
    }
}
