//! In-memory source and store used by the engine and scheduler tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::{SyncError, SyncResult};
use crate::relation::{KeyUnit, WeightPolicy};
use crate::source::{aggregate_frequency, decode_relations, SourceReader};
use crate::store::{GraphStore, UnitStats};

#[derive(Default)]
pub struct MemorySource {
    relations: Mutex<BTreeMap<String, String>>,
    frequencies: Mutex<HashMap<String, Vec<u8>>>,
    vanished: Mutex<HashSet<String>>,
    read_delay: Mutex<Option<Duration>>,
    offline: AtomicBool,
    enumerations: AtomicUsize,
    enumerated_at: Mutex<Vec<Instant>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_relations(&self, key: &str, raw: &str) {
        self.relations.lock().unwrap().insert(key.to_string(), raw.to_string());
    }

    pub fn set_frequencies(&self, key: &str, raw: &str) {
        self.set_frequency_bytes(key, raw.as_bytes());
    }

    pub fn set_frequency_bytes(&self, key: &str, raw: &[u8]) {
        self.frequencies.lock().unwrap().insert(key.to_string(), raw.to_vec());
    }

    /// Keep `key` in the enumeration but make its record unreadable.
    pub fn vanish_on_read(&self, key: &str) {
        self.vanished.lock().unwrap().insert(key.to_string());
    }

    pub fn set_read_delay(&self, delay: Duration) {
        *self.read_delay.lock().unwrap() = Some(delay);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn enumerations(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }

    /// When each enumeration (the start of a pass) happened.
    pub fn enumeration_times(&self) -> Vec<Instant> {
        self.enumerated_at.lock().unwrap().clone()
    }

    fn check_online(&self) -> SyncResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(SyncError::connection("memory-cache", "connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SourceReader for MemorySource {
    async fn enumerate_keys(&self) -> SyncResult<Vec<String>> {
        self.check_online()?;
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        self.enumerated_at.lock().unwrap().push(Instant::now());
        Ok(self.relations.lock().unwrap().keys().cloned().collect())
    }

    async fn get_relations(&self, key: &str) -> SyncResult<Option<Vec<String>>> {
        let delay = *self.read_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_online()?;
        if self.vanished.lock().unwrap().contains(key) {
            return Ok(None);
        }
        let raw = self.relations.lock().unwrap().get(key).cloned();
        raw.map(|r| decode_relations(key, &r)).transpose()
    }

    async fn get_frequency(&self, key: &str) -> SyncResult<i64> {
        self.check_online()?;
        let raw = self.frequencies.lock().unwrap().get(key).cloned();
        Ok(aggregate_frequency(key, raw.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredEdge {
    pub weight: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Default)]
struct GraphState {
    words: BTreeMap<String, (String, String)>,
    edges: BTreeMap<(String, String), StoredEdge>,
}

#[derive(Default)]
pub struct MemoryGraph {
    state: Mutex<GraphState>,
    rejected: Mutex<HashSet<String>>,
    offline: AtomicBool,
    units: AtomicUsize,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every unit for `key` fail as a store rejection.
    pub fn reject_key(&self, key: &str) {
        self.rejected.lock().unwrap().insert(key.to_string());
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn units_applied(&self) -> usize {
        self.units.load(Ordering::SeqCst)
    }

    pub fn words(&self) -> Vec<String> {
        self.state.lock().unwrap().words.keys().cloned().collect()
    }

    pub fn has_word(&self, word: &str) -> bool {
        self.state.lock().unwrap().words.contains_key(word)
    }

    pub fn edges(&self) -> Vec<(String, String, f64)> {
        self.state
            .lock()
            .unwrap()
            .edges
            .iter()
            .map(|((s, t), e)| (s.clone(), t.clone(), e.weight))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.state.lock().unwrap().edges.len()
    }

    /// Weight stored for exactly `(source, target)`, no reordering.
    pub fn weight(&self, source: &str, target: &str) -> Option<f64> {
        self.edge(source, target).map(|e| e.weight)
    }

    pub fn created_at(&self, source: &str, target: &str) -> Option<String> {
        self.edge(source, target).map(|e| e.created_at)
    }

    fn edge(&self, source: &str, target: &str) -> Option<StoredEdge> {
        self.state
            .lock()
            .unwrap()
            .edges
            .get(&(source.to_string(), target.to_string()))
            .cloned()
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn apply_unit(&self, unit: &KeyUnit, policy: WeightPolicy) -> SyncResult<UnitStats> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SyncError::connection("memory-graph", "connection reset"));
        }
        if self.rejected.lock().unwrap().contains(&unit.key) {
            return Err(SyncError::transaction(&unit.key, "rejected by test store"));
        }
        if let Some(edge) = unit.edges.iter().find(|e| e.source >= e.target) {
            return Err(SyncError::transaction(
                &unit.key,
                format!("non-canonical edge {} -> {}", edge.source, edge.target),
            ));
        }

        let now = unit.timestamp();
        let mut state = self.state.lock().unwrap();
        for word in &unit.words {
            state
                .words
                .entry(word.clone())
                .and_modify(|(_, updated)| *updated = now.clone())
                .or_insert_with(|| (now.clone(), now.clone()));
        }
        for edge in &unit.edges {
            let stored = state
                .edges
                .entry((edge.source.clone(), edge.target.clone()))
                .or_insert_with(|| StoredEdge {
                    weight: edge.weight,
                    created_at: now.clone(),
                    updated_at: now.clone(),
                });
            stored.updated_at = now.clone();
            if policy == WeightPolicy::Refresh {
                stored.weight = edge.weight;
            }
        }
        self.units.fetch_add(1, Ordering::SeqCst);

        Ok(UnitStats {
            nodes_upserted: unit.words.len(),
            relationships_upserted: unit.edges.len(),
        })
    }
}
