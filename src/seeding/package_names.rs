//! Hierarchical seeding from package names
//!
//! Node identifiers are fully-qualified `package.Class.member` paths. The
//! package prefix of every node is placed in a package tree; the shallowest
//! depth with enough distinct packages to host the requested partitions becomes
//! the *pivot depth*:
//!
//! - packages above the pivot share a catch-all label (`max_part - 1`)
//! - pivot packages receive labels round-robin over `[0, max_part - 2]`
//! - deeper packages inherit from their nearest labelled ancestor
//!
//! [`PackageSeeding::compute`] reports why the hierarchy cannot be used instead
//! of panicking or guessing; callers fall back to random seeding on error.

use crate::core::Partition;
use crate::graph::DependencyGraph;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    #[error("package seeding needs at least 2 partitions, got {max_part}")]
    TooFewPartitions { max_part: i64 },

    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("only {found} distinct packages for {max_part} partitions")]
    TooFewPackages { found: usize, max_part: i64 },

    #[error("no package depth holds at least {required} packages")]
    NoPivotDepth { required: i64 },
}

/// Package prefix of a node identifier: everything but the last two segments.
///
/// Identifiers with two segments or fewer have the empty package.
pub fn package_of(id: &str) -> String {
    let segments: Vec<&str> = id.split('.').collect();
    let keep = segments.len().saturating_sub(2);
    segments[..keep].join(".")
}

fn depth_of(package: &str) -> usize {
    package.split('.').count()
}

fn truncate(package: &str, depth: usize) -> String {
    package.split('.').take(depth).collect::<Vec<_>>().join(".")
}

/// Package-to-label assignment derived from the package hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct PackageSeeding {
    pub pivot_depth: usize,
    pub catch_all: Partition,
    pub labels: HashMap<String, Partition>,
}

/// Round-robin label dispenser over `[0, slots)`
struct RoundRobin {
    next: i64,
    slots: i64,
}

impl RoundRobin {
    fn take(&mut self) -> Partition {
        let label = Partition(self.next);
        self.next = (self.next + 1) % self.slots;
        label
    }
}

impl PackageSeeding {
    pub fn compute<'a>(
        ids: impl IntoIterator<Item = &'a str>,
        max_part: i64,
    ) -> Result<Self, SeedError> {
        if max_part < 2 {
            return Err(SeedError::TooFewPartitions { max_part });
        }

        // BTreeMap keeps packages in name order for the round-robin below
        let mut packages: BTreeMap<String, usize> = BTreeMap::new();
        let mut any_node = false;
        for id in ids {
            any_node = true;
            let package = package_of(id);
            if !packages.contains_key(&package) {
                let depth = depth_of(&package);
                packages.insert(package, depth);
            }
        }
        if !any_node {
            return Err(SeedError::EmptyGraph);
        }
        if (packages.len() as i64) < max_part {
            return Err(SeedError::TooFewPackages {
                found: packages.len(),
                max_part,
            });
        }

        let mut per_depth: BTreeMap<usize, usize> = BTreeMap::new();
        for depth in packages.values() {
            *per_depth.entry(*depth).or_default() += 1;
        }

        let required = max_part - 1;
        let pivot_depth = per_depth
            .iter()
            .find(|(_, count)| **count as i64 >= required)
            .map(|(depth, _)| *depth)
            .ok_or(SeedError::NoPivotDepth { required })?;

        let catch_all = Partition(max_part - 1);
        let mut round_robin = RoundRobin {
            next: 0,
            slots: max_part - 1,
        };

        let mut ordered: Vec<(&String, usize)> = packages.iter().map(|(p, d)| (p, *d)).collect();
        ordered.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

        let mut labels: HashMap<String, Partition> = HashMap::with_capacity(packages.len());
        for (package, depth) in ordered {
            let label = if depth < pivot_depth {
                catch_all
            } else if depth == pivot_depth {
                round_robin.take()
            } else {
                let inherited = (pivot_depth..depth)
                    .rev()
                    .find_map(|d| labels.get(&truncate(package, d)).copied());
                match inherited {
                    Some(label) => label,
                    None => {
                        let label = round_robin.take();
                        labels.insert(truncate(package, pivot_depth), label);
                        label
                    }
                }
            };
            labels.insert(package.clone(), label);
        }

        Ok(Self {
            pivot_depth,
            catch_all,
            labels,
        })
    }

    pub fn label_for(&self, id: &str) -> Partition {
        self.labels
            .get(&package_of(id))
            .copied()
            .unwrap_or(self.catch_all)
    }

    pub fn apply(&self, graph: &mut DependencyGraph) {
        let indices: Vec<_> = graph.node_indices().collect();
        for idx in indices {
            let label = self.label_for(&graph.node_at(idx).id);
            graph.set_partition(idx, label);
        }

        tracing::debug!(
            pivot_depth = self.pivot_depth,
            packages = self.labels.len(),
            "Seeded partitions from package hierarchy"
        );
    }
}
