use crate::storage::{keys, LocalStorage, StorageError};
use movie_explorer_models::ThemeMode;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

pub struct ThemeStore {
    storage: Arc<LocalStorage>,
    mode: RwLock<ThemeMode>,
}

impl ThemeStore {
    /// Stored mode, or `light` when unset or unreadable
    pub fn load(storage: Arc<LocalStorage>) -> Self {
        let mode = storage.load::<ThemeMode>(keys::THEME_MODE).unwrap_or_default();
        Self {
            storage,
            mode: RwLock::new(mode),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.mode.read()
    }

    pub fn set(&self, mode: ThemeMode) -> Result<(), StorageError> {
        *self.mode.write() = mode;
        self.storage.save(keys::THEME_MODE, &mode)
    }

    pub fn toggle(&self) -> Result<ThemeMode, StorageError> {
        let mut current = self.mode.write();
        *current = current.toggled();
        info!("Theme switched to {}", *current);
        self.storage.save(keys::THEME_MODE, &*current)?;
        Ok(*current)
    }
}
