//! Configuration management for dircnt
//!
//! Settings are layered with figment, lowest priority first:
//! compiled-in defaults, `dircnt.toml` in the working directory (or the file
//! passed with `--config`), then `DIRCNT_*` environment variables. Command
//! line flags are applied on top by the CLI.

use crate::walker::{DEFAULT_MAX_PATH_LEN, WalkOptions};
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file picked up from the working directory
pub const CONFIG_FILE: &str = "dircnt.toml";

/// Prefix for environment overrides, e.g. `DIRCNT_FORCE_METADATA=true`
pub const ENV_PREFIX: &str = "DIRCNT_";

/// How the summary is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<path> contains <n> files and <m> directories`
    #[default]
    Text,
    /// One JSON object per run
    Json,
}

/// Main configuration structure for dircnt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DircntConfig {
    /// lstat every entry instead of trusting readdir type hints
    pub force_metadata: bool,

    /// Longest path the walker will build before giving up on a directory
    pub max_path_len: usize,

    /// Summary format
    pub format: OutputFormat,
}

impl Default for DircntConfig {
    fn default() -> Self {
        let walk = WalkOptions::default();
        Self {
            force_metadata: walk.force_metadata,
            max_path_len: DEFAULT_MAX_PATH_LEN,
            format: OutputFormat::default(),
        }
    }
}

impl DircntConfig {
    /// Load defaults, config file and environment
    pub fn load(custom_config: Option<&Path>) -> Result<Self> {
        if let Some(path) = custom_config {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
        }

        let config: DircntConfig = Self::figment(custom_config)
            .extract()
            .context("Failed to load configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// The provider stack behind [`DircntConfig::load`]
    pub fn figment(custom_config: Option<&Path>) -> Figment {
        let file = match custom_config {
            Some(path) => Toml::file(path),
            None => Toml::file(CONFIG_FILE),
        };

        Figment::from(Serialized::defaults(DircntConfig::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Apply command line flags on top of the loaded values
    pub fn apply_overrides(
        &mut self,
        force_metadata: bool,
        max_path_len: Option<usize>,
        format: Option<OutputFormat>,
    ) -> Result<()> {
        // the flag can only switch metadata mode on
        if force_metadata {
            self.force_metadata = true;
        }
        if let Some(len) = max_path_len {
            self.max_path_len = len;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self.validate()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_path_len == 0 {
            anyhow::bail!("max_path_len cannot be 0");
        }
        Ok(())
    }

    /// Walker settings derived from this configuration
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            force_metadata: self.force_metadata,
            max_path_len: self.max_path_len,
        }
    }
}

#[cfg(test)]
mod tests;
