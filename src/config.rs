//! JSON config file
//!
//! Optional; without `--config` the game runs on built-in defaults and
//! reads no files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::tuning::Tuning;

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Everything a config file can set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tuning: Tuning,
    pub settings: Settings,
}

impl Config {
    /// Parse and validate config JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.tuning.validate()?;
        Ok(config)
    }

    /// Load from a file path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_sections_override() {
        let config = Config::from_json(
            r#"{
                "tuning": { "spawn_every_ms": 500, "block_max_speed": 10 },
                "settings": { "show_fps": true, "target_fps": 30 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.tuning.spawn_every_ms, 500);
        assert_eq!(config.tuning.block_max_speed, 10);
        assert_eq!(config.tuning.block_min_speed, 3);
        assert!(config.settings.show_fps);
        assert_eq!(config.settings.target_fps, 30);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Config::from_json("{ tuning: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let err = Config::from_json(r#"{ "tuning": { "spawn_every_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("spawn_every_ms"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/dodge-blocks.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
