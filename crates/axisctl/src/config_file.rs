//! Loading and rendering controller configuration files.

use crate::error::CliError;
use axisdrive_engine::ControllerConfig;
use clap::ValueEnum;
use std::fs;
use std::path::Path;

/// On-disk configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, CliError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(CliError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Parse a configuration without validating it.
pub fn parse_config(text: &str, format: ConfigFormat) -> Result<ControllerConfig, CliError> {
    let config = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(text)?,
        ConfigFormat::Json => serde_json::from_str(text)?,
    };
    Ok(config)
}

/// Read, parse and validate a configuration file.
pub fn load_config(path: &Path) -> Result<ControllerConfig, CliError> {
    let format = ConfigFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&text, format)?;
    config.validate()?;
    tracing::info!(path = %path.display(), mode = %config.mode, "loaded controller configuration");
    Ok(config)
}

/// Serialize a configuration.
pub fn render_config(config: &ControllerConfig, format: ConfigFormat) -> Result<String, CliError> {
    let text = match format {
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
    };
    Ok(text)
}
