use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// `assets/game.json`. Every field has a default so a missing file or a
/// partial one still yields a runnable setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct GameConfig {
    pub(crate) map_name: String,
    pub(crate) initial_orientation: String,
    pub(crate) move_cooldown_ms: u64,
    pub(crate) demo_script: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_name: "proto".to_owned(),
            initial_orientation: "north".to_owned(),
            move_cooldown_ms: 300,
            demo_script: String::new(),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },
}

pub(crate) fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "config_missing_using_defaults");
            return Ok(GameConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_owned(),
                source,
            })
        }
    };

    let deserializer = &mut serde_json::Deserializer::from_str(&text);
    serde_path_to_error::deserialize(deserializer).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}
