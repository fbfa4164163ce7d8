use std::io;
use thiserror::Error;

/// Unified error type for the projchat application
#[derive(Error, Debug)]
pub enum ProjchatError {
    /// Errors reported by the model backend (bad status, empty candidates, ...)
    #[error("API error: {0}")]
    Api(String),

    /// Configuration-related errors (missing credential, unreadable config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ProjchatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProjchatError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ProjchatError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            ProjchatError::Api(format!("API returned error status: {}", err))
        } else {
            ProjchatError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for ProjchatError {
    fn from(err: serde_json::Error) -> Self {
        ProjchatError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for ProjchatError {
    fn from(err: serde_yml::Error) -> Self {
        ProjchatError::Serialization(format!("YAML error: {}", err))
    }
}
