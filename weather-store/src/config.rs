//! Host configuration with precedence handling.
//!
//! Precedence: command line > config file > defaults. The config file is
//! optional and lives at `<config dir>/weather-store/config.toml` unless a
//! path is given explicitly.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use wx_dispatch::JsonFileStore;

/// Directory name under the platform config/data dirs.
pub const APP_NAME: &str = "weather-store";

const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("Failed to read config file at {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No explicit store path and the platform has no data directory.
    #[error("No data directory available; pass --store or --memory")]
    NoDataDir,
}

/// TOML configuration file structure. All keys are optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Local storage file.
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// `tracing` filter directive, e.g. `"info,weather_store=debug"`.
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Dispatch the stored favorites before any input action.
    #[serde(default)]
    pub seed_favorites: Option<bool>,
}

/// Values taken from the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub store_path: Option<PathBuf>,
    pub memory: bool,
    pub log_filter: Option<String>,
    pub no_seed: bool,
}

/// Where local storage lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

/// Fully resolved host settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub store: StoreLocation,
    pub log_filter: String,
    pub seed_favorites: bool,
}

/// `<config dir>/weather-store/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
}

/// Load a config file. A missing file is `Ok(None)`.
pub fn load_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    toml::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Merge file values and CLI overrides over the defaults.
pub fn resolve(file: Option<ConfigFile>, cli: &CliOverrides) -> Result<HostConfig, ConfigError> {
    let file = file.unwrap_or_default();

    let store = if cli.memory {
        StoreLocation::Memory
    } else if let Some(path) = cli.store_path.clone().or(file.store_path) {
        StoreLocation::File(path)
    } else {
        StoreLocation::File(JsonFileStore::default_path(APP_NAME).ok_or(ConfigError::NoDataDir)?)
    };

    let log_filter = cli
        .log_filter
        .clone()
        .or(file.log_filter)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let seed_favorites = !cli.no_seed && file.seed_favorites.unwrap_or(true);

    Ok(HostConfig {
        store,
        log_filter,
        seed_favorites,
    })
}
