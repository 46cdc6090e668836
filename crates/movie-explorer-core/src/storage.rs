use movie_explorer_config::PathManager;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Keys of the durable local state
pub mod keys {
    pub const USER: &str = "user";
    pub const REMEMBERED_EMAIL: &str = "rememberedEmail";
    pub const WATCHLIST: &str = "watchlist";
    pub const FAVORITES: &str = "favorites";
    pub const SEARCH_HISTORY: &str = "movieExplorerSearchHistory";
    pub const THEME_MODE: &str = "themeMode";

    pub const ALL: [&str; 6] = [USER, REMEMBERED_EMAIL, WATCHLIST, FAVORITES, SEARCH_HISTORY, THEME_MODE];
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Key/value store keeping one JSON document per key.
///
/// Reads never fail: a missing file is `None`, and a file that no longer
/// parses as the requested type is deleted and reported as `None`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn from_paths(path_manager: &PathManager) -> Result<Self, StorageError> {
        Self::new(path_manager.storage_dir())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);
        if !path.exists() {
            debug!("Storage miss: {}", key);
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read stored {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<T>(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Stored {} is corrupted: {}. Discarding it.", key, e);
                if let Err(rm_err) = std::fs::remove_file(&path) {
                    warn!("Failed to delete corrupted {}: {}", key, rm_err);
                }
                None
            }
        }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        std::fs::write(self.key_path(key), json).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })?;
        debug!("Stored {}", key);
        Ok(())
    }

    /// Delete a key; deleting an absent key is not an error
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Remove every key the application writes
    pub fn clear_all(&self) -> Result<(), StorageError> {
        for key in keys::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}
