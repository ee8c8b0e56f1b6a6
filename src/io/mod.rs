pub mod summary;

pub use summary::format_summary_terminal;

use crate::core::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Method-level output written by the `partition` command
pub const PARTITIONS_FILE: &str = "partitions.json";
/// Class-level output written by the `partition` command
pub const CLASS_PARTITIONS_FILE: &str = "class_partitions.json";

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| Error::file_system("Failed to create output directory", path, e))?;
    }
    Ok(())
}

/// Pretty-print `value` as JSON into `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| Error::file_system("Failed to write output", path, e))
}
