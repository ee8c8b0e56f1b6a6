//! Annotated output of a partitioning run
//!
//! The assembler copies every input node record and adds three fields:
//! `partition`, `centrality` and `modified`. Edge records are returned as they
//! were read.

use crate::graph::{DependencyGraph, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PARTITION_FIELD: &str = "partition";
pub const CENTRALITY_FIELD: &str = "centrality";
pub const MODIFIED_FIELD: &str = "modified";

/// Method-level graph with partition and centrality on every node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionedGraph {
    pub nodes: Vec<Record>,
    pub edges: Vec<Record>,
}

impl PartitionedGraph {
    pub fn node(&self, id: &str) -> Option<&Record> {
        self.nodes
            .iter()
            .find(|node| node.get("id").and_then(Value::as_str) == Some(id))
    }
}

/// Merge labels and degree centrality from `graph` into copies of the input
/// records.
///
/// Records are looked up by id, so duplicate input records all receive the
/// values of the node that survived construction. A record the graph does not
/// know gets a null partition and zero centrality.
pub fn assemble(graph: &DependencyGraph, nodes: &[Record], edges: &[Record]) -> PartitionedGraph {
    let centrality = graph.degree_centrality();

    let annotated = nodes
        .iter()
        .map(|record| {
            let mut annotated = record.clone();
            let id = record.get("id").and_then(Value::as_str).unwrap_or_default();
            let node = graph.node(id);
            if node.is_none() {
                tracing::warn!(id, "Node record has no counterpart in the graph");
            }

            let partition = node
                .and_then(|n| n.partition)
                .map_or(Value::Null, |p| Value::from(p.id()));
            let modified = node.is_some_and(|n| n.modified);
            let score = centrality.get(id).copied().unwrap_or(0.0);

            annotated.insert(PARTITION_FIELD.to_string(), partition);
            annotated.insert(CENTRALITY_FIELD.to_string(), Value::from(score));
            annotated.insert(MODIFIED_FIELD.to_string(), Value::Bool(modified));
            annotated
        })
        .collect();

    PartitionedGraph {
        nodes: annotated,
        edges: edges.to_vec(),
    }
}
