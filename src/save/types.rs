//! Save data types for tilemaps
//!
//! This module defines the on-disk layout of a map file and the error type shared
//! by every save/load operation. It uses Serde for serialization to JSON.

use crate::tile::{Tile, TileKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use thiserror::Error;

/// The root map file structure
///
/// ```json
/// {
///   "tile_size": 16,
///   "physics_tile_types": ["grass", "stone"],
///   "tilemap": { "2;0": { "type": "grass", "variant": 1, "position": [2.0, 0.0] } },
///   "offgrid": [ { "type": "decor", "variant": 0, "position": [37.5, 4.0] } ]
/// }
/// ```
///
/// Grid keys are kept as the canonical `"x;y"` strings so a saved file reads the
/// same as the key space the tilemap uses in memory. `BTreeMap`/`BTreeSet` keep the
/// output stable between saves of the same map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilemapSaveData {
    pub tile_size: u32,
    pub physics_tile_types: BTreeSet<TileKind>,
    pub tilemap: BTreeMap<String, Tile>,
    pub offgrid: Vec<Tile>,
}

/// Error types for save/load operations
#[derive(Debug, Error)]
pub enum SaveError {
    /// The requested map file does not exist. Callers usually recover from this
    /// by starting with an empty map.
    #[error("map file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("corrupted map data: {0}")]
    CorruptedData(String),
}

impl SaveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SaveError::NotFound(_))
    }
}
