//! Terminal output formatting.

use colored::Colorize;

use wordgraph_core::{PassSummary, SyncConfig};
use wordgraph_graph::GraphCounts;

/// Print the result of one pass.
pub fn print_summary(summary: &PassSummary) {
    let headline = if summary.is_clean() {
        "Sync complete:".green().bold()
    } else {
        "Sync finished with failures:".yellow().bold()
    };

    println!("\n{}", headline);
    println!("  Keys seen:              {}", summary.keys_seen);
    println!("  Synced:                 {}", summary.synced.to_string().green());
    println!("  Skipped:                {}", summary.skipped);
    println!("  Failed:                 {}", colored_count(summary.failed));
    println!("  Self-loops ignored:     {}", summary.self_loops_skipped);
    println!("  Words upserted:         {}", summary.nodes_upserted);
    println!("  Relationships upserted: {}", summary.relationships_upserted);
    println!("  Elapsed:                {:.2?}", summary.elapsed);

    if !summary.failures.is_empty() {
        println!("\n{}", "Failed keys:".bold());
        let mut failures: Vec<_> = summary.failures.iter().collect();
        failures.sort_by(|a, b| a.key.cmp(&b.key));
        for failure in failures {
            println!("  {} {} {}", "✗".red(), failure.key.cyan(), truncate(&failure.error, 100).dimmed());
        }
    }
}

/// Print word graph counts.
pub fn print_counts(config: &SyncConfig, counts: &GraphCounts) {
    println!("{}", "Word Graph Status".bold());
    println!("{}", "─".repeat(40));
    println!("  Store:         {}", config.graph.uri.dimmed());
    println!("  Words:         {}", counts.words.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());
    println!("{}", "─".repeat(40));
}

fn colored_count(n: usize) -> colored::ColoredString {
    if n == 0 {
        n.to_string().normal()
    } else {
        n.to_string().red()
    }
}

/// Truncate a string to at most `max` characters, adding an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
