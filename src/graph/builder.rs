//! Construction of a [`DependencyGraph`] from raw SDG records

use super::{DependencyGraph, ParallelEdgePolicy, Record};
use crate::core::{Error, Result};
use serde_json::Value;

impl DependencyGraph {
    /// Build the graph from the node and edge lists of an SDG document.
    ///
    /// Fails on the first record that lacks a required field. Duplicate node
    /// ids keep their first record; self-loops are dropped.
    pub fn from_records(
        nodes: &[Record],
        edges: &[Record],
        parallel_edges: ParallelEdgePolicy,
    ) -> Result<Self> {
        let mut graph = DependencyGraph::with_policy(parallel_edges);

        for (index, record) in nodes.iter().enumerate() {
            let id = required_str(record, "id").map_err(|msg| Error::malformed_node(index, msg))?;
            graph.add_node(id, record.clone());
        }

        let mut self_loops = 0usize;
        for (index, record) in edges.iter().enumerate() {
            let edge = EdgeFields::extract(record)
                .map_err(|msg| Error::malformed_edge(index, msg))?;

            for endpoint in [edge.source, edge.target] {
                if !graph.contains(endpoint) {
                    return Err(Error::malformed_edge(
                        index,
                        format!("endpoint `{}` is not a known node", endpoint),
                    ));
                }
            }

            if edge.source == edge.target {
                self_loops += 1;
                continue;
            }
            graph.add_edge(edge.source, edge.target, edge.weight, edge.kind);
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            duplicate_nodes = nodes.len() - graph.node_count(),
            self_loops,
            parallel_edges = ?graph.parallel_edge_policy(),
            "Built dependency graph"
        );

        Ok(graph)
    }
}

struct EdgeFields<'a> {
    source: &'a str,
    target: &'a str,
    weight: f64,
    kind: &'a str,
}

impl<'a> EdgeFields<'a> {
    fn extract(record: &'a Record) -> std::result::Result<Self, String> {
        let weight = record
            .get("weight")
            .ok_or_else(|| "missing field `weight`".to_string())?
            .as_f64()
            .ok_or_else(|| "field `weight` must be a number".to_string())?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(format!(
                "field `weight` must be a non-negative number, got {}",
                weight
            ));
        }

        Ok(Self {
            source: required_str(record, "source")?,
            target: required_str(record, "target")?,
            weight,
            kind: required_str(record, "type")?,
        })
    }
}

fn required_str<'a>(record: &'a Record, field: &str) -> std::result::Result<&'a str, String> {
    match record.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(format!(
            "field `{}` must be a string, got {}",
            field, other
        )),
        None => Err(format!("missing field `{}`", field)),
    }
}
