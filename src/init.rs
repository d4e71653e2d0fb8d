//! `growthos init`: write a local config and check the local package.json

use crate::config::{Config, CONFIG_FILENAME};
use crate::manifest::{AnalyticsStack, PackageManifest};
use anyhow::{Context, Result};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Options for `growthos init`
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// PostHog project key given on the command line
    pub key: Option<String>,
    /// Never prompt
    pub skip_setup: bool,
    /// Directory to initialize
    pub dir: PathBuf,
}

/// What `init` did
#[derive(Debug)]
pub struct InitSummary {
    pub config_path: PathBuf,
    /// False when a config already existed and was left alone
    pub created: bool,
    pub has_key: bool,
    /// Analytics check of the local package.json, if there is one
    pub analytics: Option<AnalyticsStack>,
}

/// Initialize `options.dir`. `input`/`output` are used for the key prompt
/// unless `skip_setup` is set or a key was passed.
pub fn init_project<R: BufRead, W: Write>(
    options: &InitOptions,
    input: &mut R,
    output: &mut W,
) -> Result<InitSummary> {
    let config_path = options.dir.join(CONFIG_FILENAME);
    let analytics = local_analytics(&options.dir)?;

    if config_path.exists() {
        return Ok(InitSummary {
            config_path,
            created: false,
            has_key: false,
            analytics,
        });
    }

    let key = match options.key.clone() {
        Some(key) => Some(key),
        None if options.skip_setup => None,
        None => prompt_for_key(input, output)?,
    };

    let config = Config {
        posthog_key: key,
        ..Default::default()
    };
    let has_key = config.posthog_key.is_some();
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, format!("{}\n", json))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    log::debug!("wrote {}", config_path.display());

    Ok(InitSummary {
        config_path,
        created: true,
        has_key,
        analytics,
    })
}

/// Ask once for the PostHog key. An empty answer means none.
pub fn prompt_for_key<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<String>> {
    write!(output, "PostHog project API key (leave empty to skip): ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read PostHog key")?;
    let key = line.trim();
    Ok(if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    })
}

/// Analytics check of `dir/package.json` when present
fn local_analytics(dir: &Path) -> Result<Option<AnalyticsStack>> {
    let path = dir.join("package.json");
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let manifest = PackageManifest::from_slice(&bytes)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    Ok(Some(manifest.analytics_stack()))
}
