pub mod errors;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use errors::{Error, RecordKind, Result, ResultExt};

/// Partition (cluster) label carried by every node after seeding.
///
/// Labels are opaque: the only meaningful operations are equality, hashing and
/// ordering. Seeding strategies produce small non-negative integers, seed files
/// may supply any integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition(pub i64);

impl Partition {
    pub fn id(self) -> i64 {
        self.0
    }
}

impl From<i64> for Partition {
    fn from(id: i64) -> Self {
        Partition(id)
    }
}

impl From<usize> for Partition {
    fn from(index: usize) -> Self {
        Partition(index as i64)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
