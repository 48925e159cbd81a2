//! Save manager for handling map save/load operations
//!
//! This module provides:
//! - `save_to_file` / `load_from_file`: single-file JSON persistence for any `Saveable`
//! - `SaveManager`: a directory of named maps with timestamped backups
//!   (listing, backup cleanup)

use super::saveable::Saveable;
use super::types::SaveError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const BACKUP_MARKER: &str = "_backup_";

/// Serialize `value` as pretty JSON and write it to `path`.
pub fn save_to_file<T: Saveable>(value: &T, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(&value.to_save_data())?;
    fs::write(path, json)?;

    log::info!("Saved {}", path.display());
    Ok(())
}

/// Read and validate a `Saveable` from `path`.
///
/// A missing file is reported as `SaveError::NotFound`, never as a generic IO
/// error, so callers can match on it and start fresh.
pub fn load_from_file<T: Saveable>(path: impl AsRef<Path>) -> Result<T, SaveError> {
    let path = path.as_ref();

    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SaveError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let data: T::Data = serde_json::from_str(&json)?;
    let value = T::from_save_data(data)?;

    log::info!("Loaded {}", path.display());
    Ok(value)
}

pub struct SaveManager {
    save_directory: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager with the given save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }

        Ok(SaveManager {
            save_directory: save_dir,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.save_directory
    }

    /// Path of the map file called `name`
    pub fn map_path(&self, name: &str) -> PathBuf {
        self.save_directory.join(format!("{}.json", name))
    }

    /// Save a map under `name`, backing up the previous version first
    pub fn save_map<T: Saveable>(&self, name: &str, value: &T) -> Result<PathBuf, SaveError> {
        self.backup_map(name)?;

        let filepath = self.map_path(name);
        save_to_file(value, &filepath)?;
        Ok(filepath)
    }

    /// Load the map called `name`
    pub fn load_map<T: Saveable>(&self, name: &str) -> Result<T, SaveError> {
        load_from_file(self.map_path(name))
    }

    /// Check if a map file exists for `name`
    pub fn map_exists(&self, name: &str) -> bool {
        self.map_path(name).exists()
    }

    /// List all map names (backups excluded), sorted alphabetically
    pub fn list_maps(&self) -> Result<Vec<String>, SaveError> {
        let mut maps = Vec::new();

        for entry in fs::read_dir(&self.save_directory)? {
            let path = entry?.path();

            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.contains(BACKUP_MARKER) {
                    maps.push(stem.to_string());
                }
            }
        }

        maps.sort();
        Ok(maps)
    }

    /// Copy the current file for `name` to a timestamped backup.
    ///
    /// Returns the backup path, or `None` when there was nothing to back up.
    pub fn backup_map(&self, name: &str) -> Result<Option<PathBuf>, SaveError> {
        let current = self.map_path(name);
        if !current.exists() {
            return Ok(None);
        }

        let backup = self.save_directory.join(self.generate_backup_filename(name));
        fs::copy(&current, &backup)?;
        log::debug!("Backed up {} to {}", current.display(), backup.display());

        Ok(Some(backup))
    }

    fn generate_backup_filename(&self, name: &str) -> String {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        format!("{}{}{}.json", name, BACKUP_MARKER, timestamp)
    }

    /// Delete old backups of `name`, keeping only the `keep_count` most recent
    pub fn cleanup_backups(&self, name: &str, keep_count: usize) -> Result<usize, SaveError> {
        let prefix = format!("{}{}", name, BACKUP_MARKER);

        let mut backups: Vec<_> = fs::read_dir(&self.save_directory)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|s| s.starts_with(&prefix))
                    .unwrap_or(false)
            })
            .collect();

        // Newest first
        backups.sort_by_key(|entry| {
            entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .map(std::cmp::Reverse)
        });

        let mut removed = 0;
        for entry in backups.iter().skip(keep_count) {
            fs::remove_file(entry.path())?;
            removed += 1;
        }

        Ok(removed)
    }
}
