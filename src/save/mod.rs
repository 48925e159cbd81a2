//! Save/Load system for maps
//!
//! This module provides:
//! - JSON map files (human-readable, diffable)
//! - An explicit `SaveError::NotFound` so callers can fall back to an empty map
//! - A directory-backed `SaveManager` with timestamped backups
//! - A trait-based design so other world data can reuse the same file handling
//!
//! # Architecture
//!
//! - `types`: Save data structures and error types
//! - `manager`: File operations and SaveManager
//! - `saveable`: Saveable trait
//!
//! # Example Usage
//!
//! ```ignore
//! let tilemap = match Tilemap::load("map.json") {
//!     Ok(map) => map,
//!     Err(e) if e.is_not_found() => Tilemap::new(16),
//!     Err(e) => return Err(e.into()),
//! };
//! tilemap.save("map.json")?;
//! ```

pub mod manager;
pub mod saveable;
pub mod types;

// Re-export commonly used types
pub use manager::{SaveManager, load_from_file, save_to_file};
pub use saveable::Saveable;
pub use types::*;
