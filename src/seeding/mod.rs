//! Initial partition labels
//!
//! Every node must carry a label before propagation starts. Four strategies are
//! available; all randomness is drawn from the caller's RNG so that a fixed seed
//! reproduces a run exactly.
//!
//! When a strategy cannot produce a meaningful seeding it degrades to
//! [`SeedStrategy::RandomMethods`], which in turn degrades to one partition per
//! node when fewer than two partitions are requested.

mod package_names;
mod random;

pub use package_names::{package_of, PackageSeeding, SeedError};

use crate::core::{Error, Partition, Result};
use crate::graph::DependencyGraph;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Class name to partition id, as read from a seed partitions file
pub type SeedMap = HashMap<String, i64>;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SeedStrategy {
    /// Independent random label per method
    RandomMethods,
    /// One random label per declaring class
    RandomClasses,
    /// Labels read from a class-to-partition seed file
    File,
    /// Labels derived from the package hierarchy (default)
    #[default]
    PackageNames,
}

impl fmt::Display for SeedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeedStrategy::RandomMethods => "random_methods",
            SeedStrategy::RandomClasses => "random_classes",
            SeedStrategy::File => "file",
            SeedStrategy::PackageNames => "package_names",
        };
        f.write_str(name)
    }
}

/// Assign an initial partition to every node of `graph`.
///
/// Returns the strategy that actually produced the labels, which differs from
/// `strategy` when package seeding fell back to random methods.
///
/// # Errors
///
/// [`Error::Configuration`] when `strategy` is [`SeedStrategy::File`] and no
/// seed map is supplied.
pub fn seed<R: Rng>(
    graph: &mut DependencyGraph,
    strategy: SeedStrategy,
    max_part: i64,
    seed_map: Option<&SeedMap>,
    rng: &mut R,
) -> Result<SeedStrategy> {
    match strategy {
        SeedStrategy::RandomMethods => random::random_methods(graph, max_part, rng),
        SeedStrategy::RandomClasses => random::random_classes(graph, max_part, rng),
        SeedStrategy::File => {
            let seed_map = seed_map.ok_or_else(|| {
                Error::configuration("seed partitions must be provided for the `file` strategy")
            })?;
            random::from_seed_map(graph, seed_map, max_part, rng);
        }
        SeedStrategy::PackageNames => {
            match PackageSeeding::compute(graph.nodes().map(|n| n.id.as_str()), max_part) {
                Ok(seeding) => seeding.apply(graph),
                Err(reason) => {
                    tracing::debug!(%reason, "Package seeding unavailable, using random methods");
                    random::random_methods(graph, max_part, rng);
                    return Ok(SeedStrategy::RandomMethods);
                }
            }
        }
    }

    Ok(strategy)
}

/// Draw one label for the node at `index`: uniform in `[1, max_part]`, or the
/// index itself when fewer than two partitions are requested.
fn draw_label<R: Rng>(rng: &mut R, max_part: i64, index: usize) -> Partition {
    if max_part < 2 {
        Partition::from(index)
    } else {
        Partition(rng.random_range(1..=max_part))
    }
}
