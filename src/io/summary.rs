//! Terminal summary of a partitioning run

use crate::assembly::{PartitionedGraph, PARTITION_FIELD};
use crate::partitioner::RunSummary;
use colored::*;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Render run statistics and per-partition sizes, largest partition first.
pub fn format_summary_terminal(summary: &RunSummary, graph: &PartitionedGraph) -> String {
    let mut output = String::new();
    let version = env!("CARGO_PKG_VERSION");

    let divider = "=".repeat(44);
    writeln!(output, "{}", divider.bright_blue()).unwrap();
    writeln!(
        output,
        "    {}",
        format!("Partmap v{}", version).bright_white().bold()
    )
    .unwrap();
    writeln!(output, "{}", divider.bright_blue()).unwrap();

    writeln!(
        output,
        "Nodes: {}  Edges: {}  Partitions: {}",
        summary.nodes, summary.edges, summary.partitions
    )
    .unwrap();

    let strategy = if summary.applied_strategy == summary.requested_strategy {
        summary.applied_strategy.to_string()
    } else {
        format!(
            "{} (fell back from {})",
            summary.applied_strategy, summary.requested_strategy
        )
    };
    writeln!(output, "Seeding: {}", strategy).unwrap();

    let convergence = if summary.propagation.converged {
        "converged".green()
    } else {
        "pass cap reached".yellow()
    };
    writeln!(
        output,
        "Propagation: {} passes, {} changes, {}",
        summary.propagation.passes, summary.propagation.changes, convergence
    )
    .unwrap();
    writeln!(output).unwrap();

    writeln!(output, "{}", "PARTITION SIZES".bright_yellow().bold()).unwrap();
    for (partition, size) in partition_sizes(graph) {
        writeln!(output, "  {:>8}  {}", partition, size).unwrap();
    }

    output
}

/// Node counts per partition label, largest first, ties by label text.
pub fn partition_sizes(graph: &PartitionedGraph) -> Vec<(String, usize)> {
    let mut sizes: BTreeMap<String, usize> = BTreeMap::new();
    for node in &graph.nodes {
        let label = match node.get(PARTITION_FIELD) {
            Some(Value::Null) | None => "-".to_string(),
            Some(value) => value.to_string(),
        };
        *sizes.entry(label).or_default() += 1;
    }

    let mut ordered: Vec<_> = sizes.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ordered
}
