use model::execution::errors::JobSpecError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration, settings or documents.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid env file: {0}")]
    EnvFile(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML document {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse settings: {0}")]
    Settings(String),

    #[error("Invalid job settings: {0}")]
    InvalidJob(#[from] JobSpecError),
}
