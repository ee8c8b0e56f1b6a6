use super::{draw_label, SeedMap};
use crate::core::Partition;
use crate::graph::DependencyGraph;
use rand::Rng;
use std::collections::HashMap;

pub(super) fn random_methods<R: Rng>(graph: &mut DependencyGraph, max_part: i64, rng: &mut R) {
    let indices: Vec<_> = graph.node_indices().collect();
    for (i, idx) in indices.into_iter().enumerate() {
        let label = draw_label(rng, max_part, i);
        graph.set_partition(idx, label);
    }
}

pub(super) fn random_classes<R: Rng>(graph: &mut DependencyGraph, max_part: i64, rng: &mut R) {
    // A candidate is drawn for every node so the RNG stream does not depend on
    // how the nodes are spread over classes; the first node of a class fixes it.
    let mut class_labels: HashMap<Option<String>, Partition> = HashMap::new();
    for (i, node) in graph.nodes().enumerate() {
        let candidate = draw_label(rng, max_part, i);
        class_labels.entry(node.class.clone()).or_insert(candidate);
    }

    let indices: Vec<_> = graph.node_indices().collect();
    for idx in indices {
        let label = class_labels[&graph.node_at(idx).class];
        graph.set_partition(idx, label);
    }
}

pub(super) fn from_seed_map<R: Rng>(
    graph: &mut DependencyGraph,
    seed_map: &SeedMap,
    max_part: i64,
    rng: &mut R,
) {
    let indices: Vec<_> = graph.node_indices().collect();
    let mut seeded = 0usize;
    for (i, idx) in indices.into_iter().enumerate() {
        let mapped = graph
            .node_at(idx)
            .class
            .as_ref()
            .and_then(|class| seed_map.get(class))
            .copied();
        let label = match mapped {
            Some(id) => {
                seeded += 1;
                Partition(id)
            }
            None => draw_label(rng, max_part, i),
        };
        graph.set_partition(idx, label);
    }

    tracing::debug!(
        seeded,
        unseeded = graph.node_count() - seeded,
        "Applied seed partitions"
    );
}
