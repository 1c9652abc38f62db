//! Configuration file support for inventory-lens.
//!
//! Provides YAML-based configuration through `inventory-lens.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::application::dto::{OutputFormat, ViewKind};
use crate::dashboard::policies::SeverityMatch;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "inventory-lens.config.yml";

/// Request timeout used when neither the config file nor the CLI sets one.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub view: Option<String>,
    pub format: Option<String>,
    pub severity_match: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Parsed `severity_match`; validation has already rejected bad values.
    pub fn severity_match(&self) -> Option<SeverityMatch> {
        self.severity_match
            .as_deref()
            .and_then(|value| SeverityMatch::from_str(value).ok())
    }

    pub fn view(&self) -> Option<ViewKind> {
        self.view
            .as_deref()
            .and_then(|value| ViewKind::from_str(value).ok())
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.format
            .as_deref()
            .and_then(|value| OutputFormat::from_str(value).ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.request_timeout_secs == Some(0) {
        bail!(
            "Invalid config: request_timeout_secs must be greater than 0.\n\n\
             💡 Hint: Use a timeout in seconds, e.g. request_timeout_secs: 30"
        );
    }

    if config.base_url.is_some() && config.data_dir.is_some() {
        bail!(
            "Invalid config: base_url and data_dir cannot both be set.\n\n\
             💡 Hint: Serve fixtures over HTTP with base_url, or read them from disk with data_dir"
        );
    }

    if let Some(ref value) = config.severity_match {
        if let Err(e) = SeverityMatch::from_str(value) {
            bail!("Invalid config: {}\n\n💡 Hint: Use 'exact' or 'case-insensitive'", e);
        }
    }

    if let Some(ref value) = config.view {
        if let Err(e) = ViewKind::from_str(value) {
            bail!("Invalid config: {}", e);
        }
    }

    if let Some(ref value) = config.format {
        if let Err(e) = OutputFormat::from_str(value) {
            bail!("Invalid config: {}", e);
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
