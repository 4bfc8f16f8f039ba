//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod layers;
pub mod output;

use anyhow::{Context, Result};
use fsd_lint_core::FsdConfig;
use std::path::Path;

use crate::config_resolver::{self, ConfigSource};

/// Resolves, loads and validates the configuration for a project directory.
pub fn load_config(project: &Path, explicit: Option<&Path>) -> Result<FsdConfig> {
    let source = config_resolver::resolve(project, explicit);

    let mut config = match &source {
        ConfigSource::Default => FsdConfig::default(),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            } else {
                tracing::debug!("Using config: {}", p.display());
            }
            FsdConfig::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    config.validate().context("Config validation failed")?;

    if config.aliases.is_empty() {
        for alias in ["@", "~"] {
            config.aliases.insert(alias.to_string(), "src".to_string());
        }
    }

    Ok(config)
}
