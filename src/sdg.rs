//! System dependency graph documents
//!
//! An SDG document is a JSON object with a `nodes` list and an `edges` list.
//! Records stay as raw JSON objects here: field validation happens when the
//! dependency graph is built, and every field a record carries travels through
//! to the annotated output.

use crate::core::{Error, Result};
use crate::graph::{DependencyGraph, ParallelEdgePolicy, Record};
use crate::seeding::SeedMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SdgDocument {
    pub nodes: Vec<Record>,
    #[serde(default)]
    pub edges: Vec<Record>,
}

impl SdgDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::file_system("Failed to read dependency graph", path, e))?;
        Self::from_json_str(&contents)
            .map_err(|e| e.with_context(format!("Parsing {}", path.display())))
    }

    pub fn to_graph(&self, parallel_edges: ParallelEdgePolicy) -> Result<DependencyGraph> {
        DependencyGraph::from_records(&self.nodes, &self.edges, parallel_edges)
    }
}

/// Read a class-to-partition seed file.
pub fn load_seed_map(path: &Path) -> Result<SeedMap> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read seed partitions", path, e))?;
    serde_json::from_str(&contents)
        .map_err(|e| Error::from(e).with_context(format!("Parsing {}", path.display())))
}
