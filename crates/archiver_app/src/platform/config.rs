use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use archiver_engine::{ClientSettings, DEFAULT_SERVER};
use archiver_logging::LogDestination;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "archiver.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to serialize config for {path:?}: {message}")]
    Serialize { path: PathBuf, message: String },
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Client settings stored as RON next to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin; requests go to `{server}/api/...`.
    pub server: String,
    /// Unset keeps the transport default (no timeout).
    pub request_timeout_secs: Option<u64>,
    pub log: LogDestination,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            request_timeout_secs: None,
            log: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            server: self.server.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Reads the config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ClientConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

pub fn write_config(path: &Path, config: &ClientConfig) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new();
    let content =
        ron::ser::to_string_pretty(config, pretty).map_err(|err| ConfigError::Serialize {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
