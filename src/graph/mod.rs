//! Dependency graph model for SDG partitioning
//!
//! The graph is an arena: nodes and edges live in a `petgraph` [`DiGraph`] and
//! are addressed by index, with a side table mapping the SDG identifier of each
//! method or field to its [`NodeIndex`]. Parallel edges between the same ordered
//! pair are kept as distinct dependency instances; readers that need a single
//! weight per neighbor go through [`DependencyGraph::neighbors`], which applies
//! the configured [`ParallelEdgePolicy`].

mod builder;
mod centrality;

use crate::core::Partition;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A raw SDG record (node or edge) as it appears in the input document.
pub type Record = Map<String, Value>;

/// How parallel edges between the same ordered pair contribute to the single
/// per-neighbor weight used for voting.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ParallelEdgePolicy {
    /// Use the weight of the first inserted edge and ignore the rest
    #[default]
    First,
    /// Add up the weights of every parallel edge
    Sum,
}

/// A method or field of the analyzed application.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodNode {
    pub id: String,
    /// Declaring class, when the input record names one
    pub class: Option<String>,
    /// The input record, carried through untouched
    pub attributes: Record,
    pub partition: Option<Partition>,
    /// Set once propagation has changed this node's label
    pub modified: bool,
}

/// A single dependency instance between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Dependency {
    pub weight: f64,
    pub kind: String,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<MethodNode, Dependency>,
    index: HashMap<String, NodeIndex>,
    parallel_edges: ParallelEdgePolicy,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(parallel_edges: ParallelEdgePolicy) -> Self {
        Self {
            parallel_edges,
            ..Self::default()
        }
    }

    pub fn parallel_edge_policy(&self) -> ParallelEdgePolicy {
        self.parallel_edges
    }

    /// Insert a node unless one with the same id already exists.
    ///
    /// The first record for an id wins; later ones are discarded. The partition
    /// always starts unset. Returns whether a node was inserted.
    pub fn add_node(&mut self, id: impl Into<String>, attributes: Record) -> bool {
        let id = id.into();
        if self.index.contains_key(&id) {
            return false;
        }

        let class = attributes
            .get("class")
            .and_then(Value::as_str)
            .map(str::to_string);
        let node = MethodNode {
            id: id.clone(),
            class,
            attributes,
            partition: None,
            modified: false,
        };
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        true
    }

    /// Insert a new parallel edge from `source` to `target`.
    ///
    /// Self-loops and edges naming an unknown endpoint are ignored. Returns the
    /// index of the new edge when one was inserted.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        weight: f64,
        kind: impl Into<String>,
    ) -> Option<EdgeIndex> {
        if source == target {
            return None;
        }
        let (&from, &to) = (self.index.get(source)?, self.index.get(target)?);
        Some(self.graph.add_edge(
            from,
            to,
            Dependency {
                weight,
                kind: kind.into(),
            },
        ))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&MethodNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    pub fn node_at(&self, idx: NodeIndex) -> &MethodNode {
        &self.graph[idx]
    }

    /// Node indices in insertion order
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &MethodNode> + '_ {
        self.graph.node_weights()
    }

    /// Every stored edge as `(source id, target id, dependency)`, parallel
    /// edges included.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &Dependency)> + '_ {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].id.as_str(),
                self.graph[edge.target()].id.as_str(),
                edge.weight(),
            )
        })
    }

    pub fn partition(&self, idx: NodeIndex) -> Option<Partition> {
        self.graph[idx].partition
    }

    pub fn partition_of(&self, id: &str) -> Option<Partition> {
        self.node(id).and_then(|node| node.partition)
    }

    /// Overwrite a node's label without touching its `modified` flag.
    pub fn set_partition(&mut self, idx: NodeIndex, partition: Partition) {
        self.graph[idx].partition = Some(partition);
    }

    /// Relabel a node as the result of a propagation step.
    pub(crate) fn relabel(&mut self, idx: NodeIndex, partition: Partition) {
        let node = &mut self.graph[idx];
        node.partition = Some(partition);
        node.modified = true;
    }

    /// Out-neighbors of `node` with one aggregated weight each.
    ///
    /// Neighbors appear once, ordered by the insertion of their first edge from
    /// `node`. Parallel edges collapse according to the graph's
    /// [`ParallelEdgePolicy`].
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> {
        let mut outgoing: Vec<_> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .collect();
        outgoing.sort_by_key(|edge| edge.id());

        let mut ordered: Vec<(NodeIndex, f64)> = Vec::with_capacity(outgoing.len());
        let mut position: HashMap<NodeIndex, usize> = HashMap::new();
        for edge in outgoing {
            let weight = edge.weight().weight;
            match position.get(&edge.target()) {
                Some(&pos) => {
                    if self.parallel_edges == ParallelEdgePolicy::Sum {
                        ordered[pos].1 += weight;
                    }
                }
                None => {
                    position.insert(edge.target(), ordered.len());
                    ordered.push((edge.target(), weight));
                }
            }
        }

        ordered.into_iter()
    }

    /// Snapshot of every node's label keyed by node id
    pub fn partitions(&self) -> HashMap<String, Partition> {
        self.nodes()
            .filter_map(|node| node.partition.map(|p| (node.id.clone(), p)))
            .collect()
    }
}
