use crate::storage::{keys, LocalStorage, StorageError};
use chrono::Utc;
use movie_explorer_config::HISTORY_CAP_RANGE;
use movie_explorer_models::SearchHistoryItem;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_HISTORY_CAP: usize = 20;

/// Most-recent-first log of submitted searches, deduplicated by
/// case-insensitive query.
pub struct SearchHistoryStore {
    storage: Arc<LocalStorage>,
    cap: usize,
    entries: RwLock<Vec<SearchHistoryItem>>,
}

impl SearchHistoryStore {
    /// `cap` is clamped into the supported range
    pub fn load(storage: Arc<LocalStorage>, cap: usize) -> Self {
        let cap = cap.clamp(*HISTORY_CAP_RANGE.start(), *HISTORY_CAP_RANGE.end());
        let mut entries: Vec<SearchHistoryItem> = storage.load(keys::SEARCH_HISTORY).unwrap_or_default();
        entries.truncate(cap);

        Self {
            storage,
            cap,
            entries: RwLock::new(entries),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn entries(&self) -> Vec<SearchHistoryItem> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Put `query` at the front of the log. Blank queries are ignored.
    pub fn record(
        &self,
        query: &str,
        poster_path: Option<String>,
        result_count: Option<u32>,
    ) -> Result<(), StorageError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }

        let mut entries = self.entries.write();
        let lowered = query.to_lowercase();
        entries.retain(|item| item.query.to_lowercase() != lowered);
        entries.insert(
            0,
            SearchHistoryItem {
                query: query.to_string(),
                timestamp: Utc::now().timestamp_millis(),
                poster_path,
                result_count,
            },
        );
        entries.truncate(self.cap);
        debug!("Recorded search '{}' ({} in history)", query, entries.len());

        self.storage.save(keys::SEARCH_HISTORY, &*entries)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.entries.write().clear();
        self.storage.remove(keys::SEARCH_HISTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(cap: usize) -> (TempDir, Arc<LocalStorage>, SearchHistoryStore) {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()).unwrap());
        let store = SearchHistoryStore::load(storage.clone(), cap);
        (dir, storage, store)
    }

    #[test]
    fn test_duplicate_query_moves_to_front() {
        let (_dir, _storage, store) = store(20);
        store.record("Batman", None, Some(20)).unwrap();
        store.record("Alien", None, None).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.record("batman", Some("/p.jpg".into()), Some(41)).unwrap();

        let entries = store.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].query, "batman");
        assert_eq!(entries[0].result_count, Some(41));
        assert_eq!(entries[1].query, "Alien");
        assert!(entries[0].timestamp > entries[1].timestamp);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let (_dir, _storage, store) = store(10);
        for i in 0..12 {
            store.record(&format!("query {}", i), None, None).unwrap();
        }

        let entries = store.entries();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].query, "query 11");
        assert_eq!(entries[9].query, "query 2");
    }

    #[test]
    fn test_cap_is_clamped() {
        let (_dir, _storage, store) = store(500);
        assert_eq!(store.cap(), 20);
    }

    #[test]
    fn test_blank_query_ignored() {
        let (_dir, storage, store) = store(20);
        store.record("   ", None, None).unwrap();
        assert!(store.is_empty());
        assert!(!storage.contains(keys::SEARCH_HISTORY));
    }

    #[test]
    fn test_reload_and_clear() {
        let (_dir, storage, store) = store(20);
        store.record("Heat", None, Some(3)).unwrap();

        let reloaded = SearchHistoryStore::load(storage.clone(), 20);
        assert_eq!(reloaded.entries()[0].query, "Heat");

        reloaded.clear().unwrap();
        assert!(reloaded.is_empty());
        assert!(!storage.contains(keys::SEARCH_HISTORY));
    }

    #[test]
    fn test_non_list_storage_is_discarded() {
        let (_dir, storage, _store) = store(20);
        storage.save(keys::SEARCH_HISTORY, &serde_json::json!({"query": "x"})).unwrap();

        let reloaded = SearchHistoryStore::load(storage.clone(), 20);
        assert!(reloaded.is_empty());
        assert!(!storage.contains(keys::SEARCH_HISTORY));
    }
}
