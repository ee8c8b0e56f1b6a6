//! Weighted label propagation
//!
//! Each pass visits every node in a freshly shuffled order and moves it to the
//! label that wins a weighted vote among its out-neighbors. Updates land
//! immediately, so nodes later in the same pass see them. The loop stops after
//! the first pass that changes nothing, or when the pass cap is reached.
//!
//! # Voting
//!
//! A neighbor reached over an edge of weight `w` casts `floor(w)` votes for its
//! current label; edges lighter than 1 cast none. The most voted label wins.
//! Ties go to the label whose first vote came earliest in neighbor order, which
//! follows edge insertion order.

use crate::core::Partition;
use crate::graph::DependencyGraph;
use petgraph::graph::NodeIndex;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_MAX_PASSES: usize = 1000;

/// Outcome of a propagation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropagationReport {
    /// Full passes executed, including the final quiet pass
    pub passes: usize,
    /// Total number of label changes across all passes
    pub changes: usize,
    /// False when the pass cap stopped the run before labels settled
    pub converged: bool,
}

#[derive(Debug, Clone)]
pub struct LabelPropagation {
    max_passes: usize,
}

impl Default for LabelPropagation {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelPropagation {
    pub fn new() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Set the maximum number of passes before giving up on convergence.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Refine the labels of `graph` in place until no node changes.
    pub fn propagate<R: Rng>(&self, graph: &mut DependencyGraph, rng: &mut R) -> PropagationReport {
        let mut order: Vec<NodeIndex> = graph.node_indices().collect();
        let mut report = PropagationReport {
            passes: 0,
            changes: 0,
            converged: false,
        };

        while report.passes < self.max_passes {
            order.shuffle(rng);
            let changed = run_pass(graph, &order);
            report.passes += 1;
            report.changes += changed;

            tracing::trace!(pass = report.passes, changed, "Propagation pass");
            if changed == 0 {
                report.converged = true;
                break;
            }
        }

        if report.converged {
            tracing::debug!(
                passes = report.passes,
                changes = report.changes,
                "Label propagation converged"
            );
        } else {
            tracing::warn!(
                max_passes = self.max_passes,
                changes = report.changes,
                "Label propagation hit the pass cap before converging"
            );
        }

        report
    }
}

fn run_pass(graph: &mut DependencyGraph, order: &[NodeIndex]) -> usize {
    let mut changed = 0;
    for &node in order {
        let Some(winner) = vote(graph, node) else {
            continue;
        };
        if graph.partition(node) != Some(winner) {
            graph.relabel(node, winner);
            changed += 1;
        }
    }
    changed
}

/// Winning label among the out-neighbors of `node`, if any neighbor votes.
pub fn vote(graph: &DependencyGraph, node: NodeIndex) -> Option<Partition> {
    // floor(weight) as f64 keeps the order of arbitrarily large counts
    let mut tally: Vec<(Partition, f64)> = Vec::new();
    let mut position: HashMap<Partition, usize> = HashMap::new();

    for (neighbor, weight) in graph.neighbors(node) {
        let votes = weight.floor();
        if votes < 1.0 {
            continue;
        }
        let Some(label) = graph.partition(neighbor) else {
            continue;
        };
        match position.get(&label) {
            Some(&pos) => tally[pos].1 += votes,
            None => {
                position.insert(label, tally.len());
                tally.push((label, votes));
            }
        }
    }

    let mut best: Option<(Partition, f64)> = None;
    for (label, votes) in tally {
        if best.map_or(true, |(_, top)| votes > top) {
            best = Some((label, votes));
        }
    }
    best.map(|(label, _)| label)
}
