use crate::core::error::ProjchatError;
use crate::workspace::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub language: Language,
}

impl Config {
    /// Load `~/.projchat/config.yaml`. A missing file yields the defaults;
    /// only an unreadable or malformed file is an error.
    pub fn load() -> Result<Self, ProjchatError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ProjchatError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ProjchatError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// The environment variable wins over the config file, matching how the
    /// credential is provisioned in deployments.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
    }

    fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".projchat/config.yaml");
            path
        })
    }
}
