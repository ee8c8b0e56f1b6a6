//! Centrality Metrics for Dependency Graphs
//!
//! Degree centrality is an output annotation only; nothing in seeding or
//! propagation reads it.

use super::DependencyGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

impl DependencyGraph {
    /// Compute normalized degree centrality for every node
    ///
    /// A node's score is `(in-degree + out-degree) / (N - 1)`. The multigraph is
    /// treated as simple: every distinct ordered `(source, target)` pair counts
    /// once no matter how many parallel edges it carries.
    ///
    /// # Returns
    ///
    /// A map from node id to a value between 0.0 and 2.0. Graphs with fewer
    /// than two nodes score every node 0.0.
    pub fn degree_centrality(&self) -> HashMap<String, f64> {
        let n = self.node_count();
        if n <= 1 {
            return self.nodes().map(|node| (node.id.clone(), 0.0)).collect();
        }

        let pairs: HashSet<(NodeIndex, NodeIndex)> = self
            .graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target()))
            .collect();

        let mut degree: HashMap<NodeIndex, usize> = HashMap::new();
        for (source, target) in pairs {
            *degree.entry(source).or_default() += 1;
            *degree.entry(target).or_default() += 1;
        }

        let scale = (n - 1) as f64;
        self.graph
            .node_indices()
            .map(|idx| {
                let d = degree.get(&idx).copied().unwrap_or(0);
                (self.graph[idx].id.clone(), d as f64 / scale)
            })
            .collect()
    }
}
