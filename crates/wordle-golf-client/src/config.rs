use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no player name configured; pass --player, set WORDLE_GOLF_PLAYER or run `wordle-golf init --player <NAME>`"
    )]
    MissingPlayer,
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not valid config: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// `config.json` under the user's config directory.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordle-golf")
        .join("config.json")
}

/// What is stored on disk. Every field is optional so a partial file still
/// loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Load the file, or `None` if it does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&data)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(write_err)
    }

    /// Take every field set in `overrides`, keep the rest.
    pub fn merged(self, overrides: &Overrides) -> Self {
        Self {
            player_name: overrides.player_name.clone().or(self.player_name),
            server_url: overrides.server_url.clone().or(self.server_url),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }
}

/// Values given on the command line or through the environment. These win
/// over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub player_name: Option<String>,
    pub server_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The local player. Submissions and "my" views use this name.
    pub player_name: String,
    pub server_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Result<Self, ConfigError> {
        let player_name = overrides
            .player_name
            .or(file.player_name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingPlayer)?;

        let server_url = overrides
            .server_url
            .or(file.server_url)
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let timeout_secs = overrides
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            player_name,
            server_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Read the config file from its default location and apply overrides.
    pub fn load(overrides: Overrides) -> Result<Self, ConfigError> {
        let file = ConfigFile::load(&config_file_path())?.unwrap_or_default();
        Self::resolve(file, overrides)
    }
}
