//! Cypher for `Word` nodes and `RELATED_TO` relationships.
//!
//! - (:Word {word})
//! - (:Word)-[:RELATED_TO {weight}]->(:Word), start node is the
//!   lexicographically smaller word

use neo4rs::Query;

use wordgraph_core::relation::{CanonicalEdge, WeightPolicy};

const UPSERT_WORD: &str = "MERGE (w:Word {word: $word})
     ON CREATE SET w.created_at = $now
     SET w.updated_at = $now";

const UPSERT_EDGE_REFRESH: &str = "MATCH (source:Word {word: $source})
     MATCH (target:Word {word: $target})
     MERGE (source)-[r:RELATED_TO]->(target)
     ON CREATE SET r.created_at = $now
     SET r.weight = $weight,
         r.updated_at = $now";

const UPSERT_EDGE_KEEP_FIRST: &str = "MATCH (source:Word {word: $source})
     MATCH (target:Word {word: $target})
     MERGE (source)-[r:RELATED_TO]->(target)
     ON CREATE SET r.weight = $weight,
                   r.created_at = $now
     SET r.updated_at = $now";

/// Cypher text for an edge upsert under `policy`.
pub fn edge_cypher(policy: WeightPolicy) -> &'static str {
    match policy {
        WeightPolicy::Refresh => UPSERT_EDGE_REFRESH,
        WeightPolicy::KeepFirst => UPSERT_EDGE_KEEP_FIRST,
    }
}

/// Create the word if absent and refresh `updated_at`.
pub fn upsert_word(word: &str, now: &str) -> Query {
    Query::new(UPSERT_WORD.to_string())
        .param("word", word)
        .param("now", now)
}

/// Create or refresh one canonical edge. Both endpoints must exist.
pub fn upsert_edge(edge: &CanonicalEdge, now: &str, policy: WeightPolicy) -> Query {
    Query::new(edge_cypher(policy).to_string())
        .param("source", edge.source.as_str())
        .param("target", edge.target.as_str())
        .param("weight", edge.weight)
        .param("now", now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_overwrites_weight_on_match() {
        let cypher = edge_cypher(WeightPolicy::Refresh);
        let (on_create, rest) = cypher.split_once("SET r.weight").unwrap();
        assert!(on_create.contains("ON CREATE SET r.created_at"));
        assert!(rest.contains("r.updated_at = $now"));
    }

    #[test]
    fn test_keep_first_sets_weight_on_create_only() {
        let cypher = edge_cypher(WeightPolicy::KeepFirst);
        assert!(cypher.contains("ON CREATE SET r.weight = $weight"));
        assert_eq!(cypher.matches("r.weight").count(), 1);
    }

    #[test]
    fn test_edges_match_existing_words_only() {
        for policy in [WeightPolicy::Refresh, WeightPolicy::KeepFirst] {
            let cypher = edge_cypher(policy);
            assert!(cypher.contains("MATCH (source:Word {word: $source})"));
            assert!(cypher.contains("MERGE (source)-[r:RELATED_TO]->(target)"));
            assert!(!cypher.contains("CREATE (source)"));
        }
    }

    #[test]
    fn test_word_keeps_created_at() {
        assert!(UPSERT_WORD.contains("ON CREATE SET w.created_at = $now"));
        assert!(UPSERT_WORD.contains("SET w.updated_at = $now"));
    }
}
