//! Application configuration management.
//!
//! Persisted user preferences, such as the default CSV export path,
//! stored as JSON in the platform config directory (XDG on Linux,
//! AppData on Windows). Anything here can be overridden per invocation
//! from the command line.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where `--export` writes when no path is given on the CLI.
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
    /// Whether console output is colored by default.
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_export_path() -> PathBuf {
    PathBuf::from("results/duplicate_matches.csv")
}

fn default_color() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
            color: default_color(),
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Falls back to defaults if the file is missing or unreadable.
    #[must_use]
    pub fn load() -> Self {
        match Self::load_internal() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn load_internal() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save the configuration to the default platform-specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created or
    /// the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("io", "sigdupe", "sigdupe")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}
