//! Periodic pass scheduling.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::error::{SyncError, SyncResult};
use crate::source::SourceReader;
use crate::store::GraphStore;
use crate::sync::SyncEngine;

/// Runs a pass immediately, then again `interval` after each pass completes.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule passes until `shutdown` is cancelled.
    ///
    /// A pass that is running when shutdown arrives is allowed to finish.
    /// Returns the number of passes that completed, or the connection error
    /// that ended the last one.
    pub async fn run<S, G>(&self, engine: &SyncEngine<S, G>, shutdown: &CancellationToken) -> SyncResult<u64>
    where
        S: SourceReader,
        G: GraphStore,
    {
        info!(interval_secs = self.interval.as_secs_f64(), "Scheduler started");
        let mut completed = 0u64;

        while !shutdown.is_cancelled() {
            match engine.process_all().await {
                Ok(summary) => {
                    completed += 1;
                    if !summary.is_clean() {
                        warn!(
                            pass = completed,
                            failed = summary.failed,
                            keys = ?summary.failed_keys(),
                            "Pass finished with failed keys"
                        );
                    }
                }
                Err(SyncError::PassInProgress) => {
                    warn!("Previous pass still running, skipping this tick");
                }
                Err(err) if err.is_connection_loss() => {
                    error!(error = %err, "Scheduler stopping on lost connection");
                    return Err(err);
                }
                Err(err) => {
                    error!(error = %err, "Pass could not start");
                }
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(passes = completed, "Scheduler stopped");
        Ok(completed)
    }
}
