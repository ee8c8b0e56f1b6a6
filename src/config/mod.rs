//! Configuration for partitioning runs
//!
//! Settings come from three layers, lowest precedence first: built-in defaults,
//! a `.partmap.toml` discovered from the working directory upwards (or named
//! with `--config`), and command-line flags.

mod core;
mod loader;

pub use self::core::{
    default_max_partitions, default_max_passes, default_seed, PartitionSettings, PartmapConfig,
    RollupSettings,
};
pub use loader::{directory_ancestors, load_config, load_config_from, parse_and_validate_config};

pub const CONFIG_FILE_NAME: &str = ".partmap.toml";

/// Contents written by `partmap init`
pub fn default_config_toml() -> String {
    let config = PartmapConfig {
        partition: Some(PartitionSettings::default()),
        rollup: Some(RollupSettings::default()),
    };
    // both tables are plain scalars and enums, which always serialize
    toml::to_string_pretty(&config).unwrap_or_default()
}
