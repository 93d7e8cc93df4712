//! Read side of a pass: the word-association source mappings.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::error::{SyncError, SyncResult};

/// Read-only access to the relations and frequencies mappings.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Snapshot of every word currently present in the relations mapping.
    async fn enumerate_keys(&self) -> SyncResult<Vec<String>>;

    /// Related words for `key`, or `None` if the record disappeared.
    async fn get_relations(&self, key: &str) -> SyncResult<Option<Vec<String>>>;

    /// Aggregate frequency for `key`; 0 when absent or unreadable.
    async fn get_frequency(&self, key: &str) -> SyncResult<i64>;
}

/// One usage observation from the frequencies mapping.
#[derive(Debug, Deserialize)]
struct Observation {
    #[serde(default)]
    frequency: i64,
}

/// Decode a relations record: a JSON array of words.
pub fn decode_relations(key: &str, raw: &str) -> SyncResult<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw).map_err(|e| SyncError::decode(key, e))
}

/// Sum the `frequency` fields of a frequencies record.
///
/// Takes raw bytes so that non-UTF-8 records also count as 0. Malformed
/// records are logged.
pub fn aggregate_frequency(key: &str, raw: Option<&[u8]>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };
    match serde_json::from_slice::<Vec<Observation>>(raw) {
        Ok(observations) => observations
            .iter()
            .fold(0i64, |sum, o| sum.saturating_add(o.frequency)),
        Err(e) => {
            warn!(key, error = %e, "Unreadable frequency record, using 0");
            0
        }
    }
}
