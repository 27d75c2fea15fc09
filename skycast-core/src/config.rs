use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Fallback query target when no explicit or stored city is available.
pub const DEFAULT_CITY: &str = "Mumbai";

/// Trim the raw input; blank input falls back to [`DEFAULT_CITY`].
pub fn resolve_city(input: &str) -> &str {
    let trimmed = input.trim();
    if trimmed.is_empty() { DEFAULT_CITY } else { trimmed }
}

/// Top-level configuration stored on disk.
///
/// Holds the OpenWeather credential and the single persisted
/// preference: the last city a lookup was attempted for.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// api_key = "..."
    pub api_key: Option<String>,

    /// Last city a lookup was attempted for, successful or not.
    pub last_city: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the API credential, or a hint on how to configure one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: pass `--api-key <KEY>` or add `api_key = \"...\"` to the config file."
            )
        })
    }

    pub fn last_city(&self) -> Option<&str> {
        self.last_city.as_deref()
    }

    pub fn set_last_city(&mut self, city: &str) {
        self.last_city = Some(city.to_string());
    }

    /// Record a lookup attempt. The store contract has no failure
    /// mode: persistence problems are logged and swallowed.
    pub fn remember_city(&mut self, city: &str, path: Option<&Path>) {
        self.set_last_city(city);

        let Some(path) = path else { return };
        if let Err(err) = self.save_to(path) {
            tracing::warn!("Failed to persist last city: {err:#}");
        }
    }
}
