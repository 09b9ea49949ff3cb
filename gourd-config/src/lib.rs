use std::fs;
use std::path::Path;

use gourd_util::GameMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod logging;

pub use logging::LoggingConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write default configuration to {path}: {source}")]
    WriteDefault {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize default configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The server configuration, read from a TOML file at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfiguration {
    /// The game mode newly joining players start in.
    pub default_gamemode: GameMode,
    /// Whether a nether world is created alongside the overworld.
    pub allow_nether: bool,
    pub logging: LoggingConfig,
}

impl Default for BasicConfiguration {
    fn default() -> Self {
        Self {
            default_gamemode: GameMode::Survival,
            allow_nether: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl BasicConfiguration {
    /// Reads the configuration from `path`. If the file does not exist yet,
    /// the defaults are written there and returned.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })
        } else {
            let config = Self::default();
            let content = toml::to_string_pretty(&config)?;
            fs::write(path, content).map_err(|source| ConfigError::WriteDefault {
                path: path.display().to_string(),
                source,
            })?;
            Ok(config)
        }
    }
}
