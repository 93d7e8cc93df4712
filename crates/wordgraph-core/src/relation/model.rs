use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happens to the weight of a relationship that already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightPolicy {
    /// Recompute and overwrite on every pass, following frequency drift.
    #[default]
    Refresh,
    /// Only set the weight when the relationship is created.
    KeepFirst,
}

impl WeightPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::KeepFirst => "keep-first",
        }
    }
}

impl fmt::Display for WeightPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refresh" => Ok(Self::Refresh),
            "keep-first" | "keep_first" | "create-only" => Ok(Self::KeepFirst),
            other => Err(format!(
                "unknown weight policy '{}', expected 'refresh' or 'keep-first'",
                other
            )),
        }
    }
}

/// An undirected edge with its endpoints in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Everything one key writes to the graph store, applied atomically.
#[derive(Debug, Clone, Serialize)]
pub struct KeyUnit {
    pub key: String,
    /// Every word touched by the unit, the key itself included.
    pub words: BTreeSet<String>,
    pub edges: Vec<CanonicalEdge>,
    pub synced_at: DateTime<Utc>,
}

impl KeyUnit {
    pub fn new(key: impl Into<String>, synced_at: DateTime<Utc>) -> Self {
        let key = key.into();
        let mut words = BTreeSet::new();
        words.insert(key.clone());
        Self {
            key,
            words,
            edges: Vec::new(),
            synced_at,
        }
    }

    /// Build a unit from already canonical edges. Later duplicates of the
    /// same pair replace earlier ones.
    pub fn with_edges(
        key: impl Into<String>,
        edges: impl IntoIterator<Item = CanonicalEdge>,
        synced_at: DateTime<Utc>,
    ) -> Self {
        let mut unit = Self::new(key, synced_at);
        let mut by_pair: BTreeMap<(String, String), f64> = BTreeMap::new();
        for edge in edges {
            unit.words.insert(edge.source.clone());
            unit.words.insert(edge.target.clone());
            by_pair.insert((edge.source, edge.target), edge.weight);
        }
        unit.edges = by_pair
            .into_iter()
            .map(|((source, target), weight)| CanonicalEdge { source, target, weight })
            .collect();
        unit
    }

    /// RFC 3339 timestamp written to `created_at`/`updated_at`.
    pub fn timestamp(&self) -> String {
        self.synced_at.to_rfc3339()
    }
}
