//! Weight derivation and undirected edge canonicalization.

pub mod model;

pub use model::{CanonicalEdge, KeyUnit, WeightPolicy};

/// Weight of the edge between two words, from their aggregate frequencies.
pub fn weight(freq_a: i64, freq_b: i64) -> f64 {
    (freq_a as f64 + freq_b as f64) / 2.0
}

/// Order two endpoints so the lexicographically smaller one comes first.
///
/// Self-loops come back unchanged.
pub fn canonicalize<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Canonical edge between `a` and `b` carrying `weight`.
pub fn canonical_edge(a: &str, b: &str, weight: f64) -> CanonicalEdge {
    let (source, target) = canonicalize(a, b);
    CanonicalEdge {
        source: source.to_string(),
        target: target.to_string(),
        weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_weight_is_mean_of_frequencies() {
        assert_eq!(weight(2, 4), 3.0);
        assert_eq!(weight(2, 0), 1.0);
        assert_eq!(weight(0, 0), 0.0);
        assert_eq!(weight(3, 4), 3.5);
    }

    #[test]
    fn test_weight_is_symmetric() {
        assert_eq!(weight(7, 11), weight(11, 7));
    }

    #[test]
    fn test_canonicalize_orders_endpoints() {
        assert_eq!(canonicalize("banana", "apple"), ("apple", "banana"));
        assert_eq!(canonicalize("apple", "banana"), ("apple", "banana"));
    }

    #[test]
    fn test_canonicalize_symmetry() {
        let words = ["apple", "Apple", "banana", "cherry", "", "zebra", "árbol", "a b"];
        for a in words {
            for b in words {
                if a != b {
                    assert_eq!(canonicalize(a, b), canonicalize(b, a), "{} / {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_canonicalize_self_loop_passes_through() {
        assert_eq!(canonicalize("echo", "echo"), ("echo", "echo"));
    }

    #[test]
    fn test_canonicalize_is_bytewise() {
        // Uppercase sorts before lowercase.
        assert_eq!(canonicalize("apple", "Zebra"), ("Zebra", "apple"));
    }

    #[test]
    fn test_unit_collapses_duplicate_pairs() {
        let now = Utc::now();
        let unit = KeyUnit::with_edges(
            "apple",
            vec![
                canonical_edge("apple", "banana", 3.0),
                canonical_edge("banana", "apple", 3.0),
                canonical_edge("apple", "cherry", 1.0),
            ],
            now,
        );
        assert_eq!(unit.edges.len(), 2);
        assert_eq!(unit.edges[0], canonical_edge("apple", "banana", 3.0));
        assert_eq!(unit.words.len(), 3);
        assert!(unit.words.contains("apple"));
    }

    #[test]
    fn test_weight_policy_parsing() {
        assert_eq!("refresh".parse::<WeightPolicy>().unwrap(), WeightPolicy::Refresh);
        assert_eq!("Keep-First".parse::<WeightPolicy>().unwrap(), WeightPolicy::KeepFirst);
        assert!("sometimes".parse::<WeightPolicy>().is_err());
        assert_eq!(WeightPolicy::default(), WeightPolicy::Refresh);
    }
}
