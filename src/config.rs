//! Game configuration
//!
//! Every field has a default, so an empty `{}` config file (or no file at all)
//! gives the stock game: 16px tiles, `map.json`, and the physics constants the
//! entity code was tuned against.

use crate::animation::AnimationLibrary;
use crate::physics::PhysicsConfig;
use crate::save::SaveError;
use crate::tile::{DEFAULT_TILE_SIZE, Tilemap};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading configuration-style JSON files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tile size used when no map file exists yet
    pub tile_size: u32,
    pub map_path: PathBuf,
    /// Optional animation library; the built-in table is used when absent
    pub animations_path: Option<PathBuf>,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// Horizontal movement intent per held direction key
    pub player_speed: f32,
    pub physics: PhysicsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tile_size: DEFAULT_TILE_SIZE,
            map_path: PathBuf::from("map.json"),
            animations_path: None,
            seed: None,
            player_speed: 1.0,
            physics: PhysicsConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn load_animations(&self) -> Result<AnimationLibrary, ConfigError> {
        match &self.animations_path {
            Some(path) => AnimationLibrary::load_from_file(path),
            None => Ok(AnimationLibrary::default()),
        }
    }

    /// Loads `map_path`, starting an empty map if the file does not exist yet.
    ///
    /// Any other failure (unreadable file, malformed JSON) is returned as is.
    pub fn load_tilemap(&self) -> Result<Tilemap, SaveError> {
        match Tilemap::load(&self.map_path) {
            Ok(map) => Ok(map),
            Err(e) if e.is_not_found() => {
                log::warn!("{}; starting with an empty map", e);
                Ok(Tilemap::new(self.tile_size))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, GameConfig::default());
        assert_eq!(config.physics.gravity, 0.1);
        assert_eq!(config.physics.terminal_velocity, 5.0);
        assert_eq!(config.physics.friction, 0.1);
    }

    #[test]
    fn test_partial_physics_override() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "seed": 7, "physics": { "gravity": 0.2 } }"#).unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.physics.gravity, 0.2);
        assert_eq!(config.physics.terminal_velocity, 5.0);
    }

    #[test]
    fn test_missing_map_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig {
            tile_size: 8,
            map_path: dir.path().join("missing.json"),
            ..GameConfig::default()
        };

        let map = config.load_tilemap().unwrap();
        assert_eq!(map.tile_size(), 8);
        assert_eq!(map.grid_len(), 0);
    }

    #[test]
    fn test_malformed_map_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(&path, "not json").unwrap();

        let config = GameConfig {
            map_path: path,
            ..GameConfig::default()
        };
        assert!(matches!(config.load_tilemap(), Err(SaveError::Serialization(_))));
    }

    #[test]
    fn test_bad_config_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "tile_size": "big" }"#).unwrap();

        assert!(matches!(
            GameConfig::load_from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
