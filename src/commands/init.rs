use crate::config::{default_config_toml, CONFIG_FILE_NAME};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub fn init_config(force: bool) -> Result<()> {
    let config_path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", config_path.display());
    Ok(())
}

/// Write the default configuration into `dir`, returning the file path
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let contents = format!("# Partmap Configuration\n\n{}", default_config_toml());
    fs::write(&config_path, contents)?;

    Ok(config_path)
}
