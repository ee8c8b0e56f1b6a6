//! Class-level view of a partitioned graph
//!
//! Method and field nodes are grouped by declaring class. Each class takes the
//! partition most of its members ended up in, and dependencies between members
//! of different classes are folded into weighted class-to-class edges.

use crate::assembly::{PartitionedGraph, CENTRALITY_FIELD, PARTITION_FIELD};
use crate::graph::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CentralityAggregation {
    /// Most central member
    #[default]
    Max,
    /// Average over members
    Mean,
    /// Total over members
    Sum,
}

impl CentralityAggregation {
    fn aggregate(self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        match self {
            CentralityAggregation::Max => scores.iter().copied().fold(f64::MIN, f64::max),
            CentralityAggregation::Mean => scores.iter().sum::<f64>() / scores.len() as f64,
            CentralityAggregation::Sum => scores.iter().sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    pub id: String,
    pub partition: Option<i64>,
    pub centrality: f64,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Sum of the member-level edge weights
    pub weight: f64,
    /// Number of member-level edges folded into this one
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassGraph {
    pub nodes: Vec<ClassNode>,
    pub edges: Vec<ClassEdge>,
}

impl ClassGraph {
    pub fn node(&self, id: &str) -> Option<&ClassNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

#[derive(Debug, Default)]
struct ClassAccumulator {
    members: Vec<String>,
    partitions: Vec<i64>,
    centralities: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassRollup {
    centrality: CentralityAggregation,
}

impl ClassRollup {
    pub fn new(centrality: CentralityAggregation) -> Self {
        Self { centrality }
    }

    pub fn rollup(&self, graph: &PartitionedGraph) -> ClassGraph {
        let mut order: Vec<String> = Vec::new();
        let mut classes: HashMap<String, ClassAccumulator> = HashMap::new();
        let mut class_of: HashMap<&str, String> = HashMap::new();

        for record in &graph.nodes {
            let Some(id) = record.get("id").and_then(Value::as_str) else {
                continue;
            };
            if class_of.contains_key(id) {
                continue;
            }
            let class = declaring_class(record, id);
            class_of.insert(id, class.clone());

            let acc = classes.entry(class.clone()).or_insert_with(|| {
                order.push(class.clone());
                ClassAccumulator::default()
            });
            acc.members.push(id.to_string());
            if let Some(p) = record.get(PARTITION_FIELD).and_then(Value::as_i64) {
                acc.partitions.push(p);
            }
            acc.centralities.push(
                record
                    .get(CENTRALITY_FIELD)
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0),
            );
        }

        let nodes = order
            .into_iter()
            .filter_map(|class| {
                let acc = classes.remove(&class)?;
                Some(ClassNode {
                    partition: majority(&acc.partitions),
                    centrality: self.centrality.aggregate(&acc.centralities),
                    members: acc.members,
                    id: class,
                })
            })
            .collect();

        let mut folded: BTreeMap<(String, String, String), (f64, usize)> = BTreeMap::new();
        for edge in &graph.edges {
            let endpoint = |field: &str| {
                edge.get(field)
                    .and_then(Value::as_str)
                    .and_then(|id| class_of.get(id))
            };
            let (Some(source), Some(target)) = (endpoint("source"), endpoint("target")) else {
                continue;
            };
            if source == target {
                continue;
            }
            let kind = edge
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            let weight = edge.get("weight").and_then(Value::as_f64).unwrap_or(0.0);

            let entry = folded
                .entry((source.clone(), target.clone(), kind))
                .or_insert((0.0, 0));
            entry.0 += weight;
            entry.1 += 1;
        }

        let edges = folded
            .into_iter()
            .map(|((source, target, kind), (weight, count))| ClassEdge {
                source,
                target,
                kind,
                weight,
                count,
            })
            .collect();

        ClassGraph { nodes, edges }
    }
}

/// Declaring class of a record: its `class` field, or the identifier without
/// its member segment.
fn declaring_class(record: &Record, id: &str) -> String {
    if let Some(class) = record.get("class").and_then(Value::as_str) {
        return class.to_string();
    }
    match id.rsplit_once('.') {
        Some((class, _)) => class.to_string(),
        None => id.to_string(),
    }
}

/// Most common partition; ties go to the smallest id.
fn majority(partitions: &[i64]) -> Option<i64> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for p in partitions {
        *counts.entry(*p).or_default() += 1;
    }
    let mut best: Option<(i64, usize)> = None;
    for (partition, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((partition, count));
        }
    }
    best.map(|(partition, _)| partition)
}
