//! Error types for axisctl

use axisdrive_errors::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported config format for {0}: expected .yaml, .yml or .json")]
    UnsupportedFormat(PathBuf),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Io { .. } => 2,
            CliError::UnsupportedFormat(_) | CliError::JsonError(_) | CliError::YamlError(_) => 3,
            CliError::Validation(_) => 4,
        }
    }
}
