//! Partition a monolith's system dependency graph (SDG) into candidate
//! microservices with weighted label propagation.
//!
//! A run builds a [`DependencyGraph`] from the SDG records, seeds every node
//! with an initial label ([`seeding`]), lets labels flow along weighted
//! dependencies until they settle ([`propagation`]), and returns the input
//! records annotated with `partition`, `centrality` and `modified`
//! ([`assembly`]). [`Partitioner`] wires these steps together.

// Export modules for library usage
pub mod assembly;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod graph;
pub mod io;
pub mod partitioner;
pub mod propagation;
pub mod rollup;
pub mod sdg;
pub mod seeding;

// Re-export commonly used types
pub use crate::assembly::{assemble, PartitionedGraph};
pub use crate::config::{PartitionSettings, PartmapConfig};
pub use crate::core::{Error, Partition, Result};
pub use crate::graph::{DependencyGraph, ParallelEdgePolicy, Record};
pub use crate::partitioner::{PartitionRun, Partitioner, RunSummary};
pub use crate::propagation::{LabelPropagation, PropagationReport};
pub use crate::rollup::{CentralityAggregation, ClassGraph, ClassRollup};
pub use crate::sdg::{load_seed_map, SdgDocument};
pub use crate::seeding::{seed, SeedError, SeedMap, SeedStrategy};
