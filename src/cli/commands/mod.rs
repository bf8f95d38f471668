//! CLI command implementations.

pub mod labels;
pub mod parse;
pub mod sync;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::errors::SetupError;
use crate::domain::models::config::Config;
use crate::infrastructure::config::{ConfigLoader, ConfigOverrides};
use crate::infrastructure::logging::{LogConfig, LoggerImpl};

/// Loads configuration from `path` or the project files, then applies `overrides`.
///
/// Any failure is a [`SetupError::InvalidConfig`].
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config, SetupError> {
    let loaded = match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .map_err(|e| SetupError::InvalidConfig(format!("{e:#}")))?;

    ConfigLoader::apply_overrides(loaded, overrides).map_err(|e| SetupError::InvalidConfig(e.to_string()))
}

/// Installs the global subscriber for this process.
pub fn init_logging(config: &Config) -> anyhow::Result<LoggerImpl> {
    LoggerImpl::init(&LogConfig::from(&config.logging))
}

/// Reads the planning document.
pub async fn read_document(path: impl AsRef<Path>) -> Result<String, SetupError> {
    let path = path.as_ref();
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => SetupError::DocumentNotFound {
            path: path.to_path_buf(),
        },
        _ => SetupError::DocumentUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })
}

fn document_override(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}
