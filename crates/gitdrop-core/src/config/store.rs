//! Config store for loading and saving gitdrop.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::RepoOptions;

pub const CONFIG_FILE_NAME: &str = "gitdrop.toml";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn from_default_dir() -> anyhow::Result<Self> {
        let global_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("gitdrop");

        Ok(Self::from_path(global_dir.join(CONFIG_FILE_NAME)))
    }

    pub fn from_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load options, falling back to defaults when the file does not exist.
    pub fn load(&self) -> anyhow::Result<RepoOptions> {
        if !self.config_path.exists() {
            return Ok(RepoOptions::default());
        }
        let content = std::fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;
        toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    pub fn save(&self, options: &RepoOptions) -> anyhow::Result<()> {
        let content =
            toml::to_string_pretty(options).context("Failed to serialize config to TOML")?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}
