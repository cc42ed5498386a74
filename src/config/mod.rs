//! `.clusterlint.toml` loading.
//!
//! An explicit path wins. Otherwise the file is looked up in the working
//! directory, then in the home directory. No file means default settings.

pub mod types;

pub use types::{Config, OutputConfig, SelectionConfig};

use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".clusterlint.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Get the global config file path (~/.clusterlint.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (dir/.clusterlint.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load configuration.
///
/// An explicit path must exist. Discovered files are optional, but a file
/// that exists and does not parse is an error rather than silently ignored.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let candidates = std::env::current_dir()
        .ok()
        .map(|cwd| local_config_path(&cwd))
        .into_iter()
        .chain(global_config_path());
    for candidate in candidates {
        if candidate.is_file() {
            return read_config(&candidate);
        }
    }

    log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
    Ok(Config::default())
}

/// Read and parse one config file.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}
