use partmap::graph::Record;
use partmap::{seed, DependencyGraph, LabelPropagation, ParallelEdgePolicy, SeedStrategy};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::collections::HashSet;

fn node_record(i: usize) -> Record {
    json!({
        "id": format!("app.pkg{}.Class{}.m{}", i % 4, i % 6, i),
        "class": format!("app.pkg{}.Class{}", i % 4, i % 6),
    })
    .as_object()
    .cloned()
    .unwrap()
}

fn edge_record(source: usize, target: usize, weight: f64) -> Record {
    json!({
        "source": format!("app.pkg{}.Class{}.m{}", source % 4, source % 6, source),
        "target": format!("app.pkg{}.Class{}.m{}", target % 4, target % 6, target),
        "weight": weight,
        "type": "CALL_DEP",
    })
    .as_object()
    .cloned()
    .unwrap()
}

fn strategy_strategy() -> impl Strategy<Value = SeedStrategy> {
    prop_oneof![
        Just(SeedStrategy::RandomMethods),
        Just(SeedStrategy::RandomClasses),
        Just(SeedStrategy::PackageNames),
    ]
}

prop_compose! {
    fn arb_graph()(size in 1usize..24)(
        edges in prop::collection::vec((0..size, 0..size, 0.0f64..6.0), 0..size * 3),
        size in Just(size),
        policy in prop_oneof![Just(ParallelEdgePolicy::First), Just(ParallelEdgePolicy::Sum)],
    ) -> DependencyGraph {
        let nodes: Vec<Record> = (0..size).map(node_record).collect();
        let edges: Vec<Record> = edges
            .into_iter()
            .map(|(s, t, w)| edge_record(s, t, w))
            .collect();
        DependencyGraph::from_records(&nodes, &edges, policy).unwrap()
    }
}

proptest! {
    #[test]
    fn prop_built_graph_has_no_self_loops(graph in arb_graph()) {
        prop_assert!(graph.edges().all(|(source, target, _)| source != target));
    }

    #[test]
    fn prop_seeding_labels_every_node(
        mut graph in arb_graph(),
        strategy in strategy_strategy(),
        max_part in -1i64..6,
        rng_seed in any::<u64>(),
    ) {
        seed(&mut graph, strategy, max_part, None, &mut StdRng::seed_from_u64(rng_seed)).unwrap();
        prop_assert!(graph.nodes().all(|node| node.partition.is_some()));
    }

    #[test]
    fn prop_propagation_never_invents_labels(
        mut graph in arb_graph(),
        strategy in strategy_strategy(),
        max_part in -1i64..6,
        rng_seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(rng_seed);
        seed(&mut graph, strategy, max_part, None, &mut rng).unwrap();
        let initial: HashSet<_> = graph.nodes().filter_map(|n| n.partition).collect();

        LabelPropagation::new().propagate(&mut graph, &mut rng);

        let after: HashSet<_> = graph.nodes().filter_map(|n| n.partition).collect();
        prop_assert!(after.is_subset(&initial));
    }

    #[test]
    fn prop_converged_labels_are_stable(
        mut graph in arb_graph(),
        max_part in -1i64..6,
        rng_seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(rng_seed);
        seed(&mut graph, SeedStrategy::RandomMethods, max_part, None, &mut rng).unwrap();

        let first = LabelPropagation::new().propagate(&mut graph, &mut rng);
        let settled = graph.partitions();
        let second = LabelPropagation::new().propagate(&mut graph, &mut rng);

        if first.converged {
            prop_assert_eq!(second.changes, 0);
            prop_assert_eq!(graph.partitions(), settled);
        }
    }

    #[test]
    fn prop_only_relabelled_nodes_are_modified(
        mut graph in arb_graph(),
        max_part in -1i64..6,
        rng_seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(rng_seed);
        seed(&mut graph, SeedStrategy::RandomMethods, max_part, None, &mut rng).unwrap();
        let seeded = graph.partitions();

        LabelPropagation::new().propagate(&mut graph, &mut rng);

        for node in graph.nodes() {
            if !node.modified {
                prop_assert_eq!(node.partition, seeded.get(&node.id).copied());
            }
        }
    }
}
