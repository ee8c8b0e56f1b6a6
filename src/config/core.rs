use serde::{Deserialize, Serialize};

use crate::graph::ParallelEdgePolicy;
use crate::propagation::DEFAULT_MAX_PASSES;
use crate::rollup::CentralityAggregation;
use crate::seeding::SeedStrategy;

/// Root configuration structure for partmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PartmapConfig {
    /// Seeding and propagation settings
    #[serde(default)]
    pub partition: Option<PartitionSettings>,

    /// Class-level rollup settings
    #[serde(default)]
    pub rollup: Option<RollupSettings>,
}

impl PartmapConfig {
    pub fn partition_settings(&self) -> PartitionSettings {
        self.partition.clone().unwrap_or_default()
    }

    pub fn rollup_settings(&self) -> RollupSettings {
        self.rollup.clone().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        match &self.partition {
            Some(partition) => partition.validate(),
            None => Ok(()),
        }
    }
}

/// Settings that drive a partitioning run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartitionSettings {
    /// Upper bound on the number of partitions; below 2 means unbounded
    #[serde(default = "default_max_partitions")]
    pub max_partitions: i64,

    /// Initial labelling strategy
    #[serde(default)]
    pub strategy: SeedStrategy,

    /// Seed for the random source shared by seeding and propagation
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Pass cap for label propagation
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,

    /// How parallel edges contribute to a neighbor's vote weight
    #[serde(default)]
    pub parallel_edges: ParallelEdgePolicy,
}

pub fn default_max_partitions() -> i64 {
    -1
}

pub fn default_seed() -> u64 {
    42
}

pub fn default_max_passes() -> usize {
    DEFAULT_MAX_PASSES
}

impl Default for PartitionSettings {
    fn default() -> Self {
        Self {
            max_partitions: default_max_partitions(),
            strategy: SeedStrategy::default(),
            seed: default_seed(),
            max_passes: default_max_passes(),
            parallel_edges: ParallelEdgePolicy::default(),
        }
    }
}

impl PartitionSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_passes == 0 {
            return Err("partition.max_passes must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Settings for the class-level view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollupSettings {
    /// Whether to write the class-level view next to the method-level one
    #[serde(default = "default_class_view")]
    pub enabled: bool,

    /// How member centralities combine into a class centrality
    #[serde(default)]
    pub centrality: CentralityAggregation,
}

fn default_class_view() -> bool {
    true
}

impl Default for RollupSettings {
    fn default() -> Self {
        Self {
            enabled: default_class_view(),
            centrality: CentralityAggregation::default(),
        }
    }
}
