//! Configuration for studyweek

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::storage::default_data_dir;

/// Default assistant greeting for a fresh transcript
pub const DEFAULT_GREETING: &str =
    "Hi! I'm your scheduling assistant. Tell me about your week and I'll help you plan it.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the persisted slices live
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chat behavior
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory the slice files are written to
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Assistant greeting used to seed and reset the transcript
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
        }
    }
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            info!(path = %config_path.display(), "Config::load: loaded config file");
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            Some(PathBuf::from(".studyweek.yml")),
            dirs::config_dir().map(|p| p.join("studyweek").join("studyweek.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                info!(path = %path.display(), "Config::load: loaded config file");
                return Ok(config);
            }
        }

        info!("Config::load: no config file found, using defaults");
        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
