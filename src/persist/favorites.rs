//! # Favorites Persistence
//!
//! A single durable slot: the full favorites sequence serialized as JSON in
//! `<data_dir>/favorites.json`. No versioning, no migration. Writes are
//! atomic (write `.tmp`, then `rename()`) for crash safety.
//!
//! A missing or unreadable file is not an error at this layer: `load`
//! recovers to an empty sequence and logs, so a corrupt file can never
//! break store construction.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::core::country::Country;

const FAVORITES_FILE: &str = "favorites.json";

pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(FAVORITES_FILE),
        }
    }

    /// The persisted favorites, or an empty sequence if the file is absent
    /// or fails to parse. Parse failures are swallowed here, never
    /// propagated as a store-level error.
    pub fn load(&self) -> Vec<Country> {
        if !self.path.exists() {
            return Vec::new();
        }
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&json) {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!(
                    "Ignoring unparseable favorites file {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Serializes the full sequence, overwriting any previous value.
    pub fn save(&self, favorites: &[Country]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(favorites)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        debug!("Saved {} favorite(s)", favorites.len());
        Ok(())
    }

    /// Deletes the persisted value entirely.
    pub fn clear(&self) -> io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
