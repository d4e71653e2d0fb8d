//! Configuration loading for GrowthOS

mod schema;

pub use schema::{Config, ENV_API_URL, ENV_GITHUB_TOKEN};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".growthosrc.json";

/// Find and load the config file. Searches the working directory then parents.
/// Environment overrides are not applied here; see [`load_effective_config`].
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}

/// Config file merged with `GITHUB_TOKEN` / `GROWTHOS_API_URL`
pub fn load_effective_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    Ok(load_config(work_dir, custom_path)?.merge_env(|key| std::env::var(key).ok()))
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Search for .growthosrc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}
