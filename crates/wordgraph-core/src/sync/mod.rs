//! Source to graph synchronization pass.
//!
//! Each key becomes one [`KeyUnit`]: the key's `Word`, its related `Word`s
//! and the canonical `RELATED_TO` edges between them. Units are built from
//! the source first and then handed to the store as a single transaction, so
//! a failing key never leaves a partial write behind.

pub mod summary;

use std::time::{Duration, Instant};

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::ScheduleConfig;
use crate::error::{SyncError, SyncResult};
use crate::relation::{canonical_edge, weight, KeyUnit, WeightPolicy};
use crate::source::SourceReader;
use crate::store::GraphStore;

pub use summary::{KeyFailure, KeyOutcome, PassSummary, SkipReason};

/// Limits applied to every pass.
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    pub concurrency: usize,
    pub unit_timeout: Duration,
    pub weight_policy: WeightPolicy,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from(&ScheduleConfig::default())
    }
}

impl From<&ScheduleConfig> for SyncOptions {
    fn from(config: &ScheduleConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            unit_timeout: config.unit_timeout(),
            weight_policy: config.weight_policy,
        }
    }
}

/// Drives full passes from a [`SourceReader`] into a [`GraphStore`].
pub struct SyncEngine<S, G> {
    source: S,
    store: G,
    options: SyncOptions,
    active_pass: Mutex<()>,
}

impl<S, G> SyncEngine<S, G>
where
    S: SourceReader,
    G: GraphStore,
{
    pub fn new(source: S, store: G, options: SyncOptions) -> Self {
        Self {
            source,
            store,
            options,
            active_pass: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &G {
        &self.store
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Run one full pass over every key currently in the source.
    ///
    /// Per-key failures are recorded in the summary. Only a lost connection
    /// ends the pass early, and a pass requested while another one is running
    /// fails with `PassInProgress`.
    pub async fn process_all(&self) -> SyncResult<PassSummary> {
        let _active = self
            .active_pass
            .try_lock()
            .map_err(|_| SyncError::PassInProgress)?;

        let started = Instant::now();
        let keys = self.source.enumerate_keys().await?;
        info!(keys = keys.len(), "Starting sync pass");

        let mut summary = PassSummary {
            keys_seen: keys.len(),
            ..PassSummary::default()
        };

        let engine = self;
        let mut units = stream::iter(keys)
            .map(move |key| async move {
                let outcome = engine.sync_key_bounded(&key).await;
                (key, outcome)
            })
            .buffer_unordered(self.options.concurrency.max(1));

        while let Some((key, outcome)) = units.next().await {
            let outcome = match outcome {
                KeyOutcome::Failed(err) if err.is_connection_loss() => {
                    error!(key = %key, error = %err, "Connection lost, aborting pass");
                    return Err(err);
                }
                KeyOutcome::Failed(err) => {
                    warn!(key = %key, error = %err, "Failed to sync word");
                    KeyOutcome::Failed(err)
                }
                other => other,
            };
            summary.record(key, outcome);
        }

        summary.elapsed = started.elapsed();
        info!(
            keys = summary.keys_seen,
            synced = summary.synced,
            skipped = summary.skipped,
            failed = summary.failed,
            self_loops = summary.self_loops_skipped,
            nodes = summary.nodes_upserted,
            relationships = summary.relationships_upserted,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Sync pass complete"
        );

        Ok(summary)
    }

    /// Synchronize one key, bounded by the unit timeout.
    pub async fn sync_key_bounded(&self, key: &str) -> KeyOutcome {
        let limit = self.options.unit_timeout;
        match tokio::time::timeout(limit, self.sync_key(key)).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => KeyOutcome::Failed(err),
            Err(_) => KeyOutcome::Failed(SyncError::Timeout {
                key: key.to_string(),
                elapsed: limit,
            }),
        }
    }

    /// Build the unit of work for `key` and commit it.
    pub async fn sync_key(&self, key: &str) -> SyncResult<KeyOutcome> {
        let Some(related) = self.source.get_relations(key).await? else {
            debug!(key, "Relations record vanished, skipping");
            return Ok(KeyOutcome::Skipped(SkipReason::Vanished));
        };

        let key_frequency = self.source.get_frequency(key).await?;
        let mut self_loops = 0;
        let mut edges = Vec::with_capacity(related.len());

        for word in &related {
            if word == key {
                self_loops += 1;
                debug!(key, "Skipping self-loop");
                continue;
            }
            let frequency = self.source.get_frequency(word).await?;
            edges.push(canonical_edge(key, word, weight(key_frequency, frequency)));
        }

        let unit = KeyUnit::with_edges(key, edges, Utc::now());
        let stats = self.store.apply_unit(&unit, self.options.weight_policy).await?;

        debug!(
            key,
            nodes = stats.nodes_upserted,
            relationships = stats.relationships_upserted,
            "Synced word"
        );
        Ok(KeyOutcome::Synced { stats, self_loops })
    }
}
