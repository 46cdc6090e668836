use crate::storage::{keys, LocalStorage, StorageError};
use movie_explorer_models::Movie;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Watchlist,
    Favorites,
}

impl CollectionKind {
    pub fn storage_key(self) -> &'static str {
        match self {
            CollectionKind::Watchlist => keys::WATCHLIST,
            CollectionKind::Favorites => keys::FAVORITES,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKind::Watchlist => "watchlist",
            CollectionKind::Favorites => "favorites",
        }
    }

    pub fn other(self) -> Self {
        match self {
            CollectionKind::Watchlist => CollectionKind::Favorites,
            CollectionKind::Favorites => CollectionKind::Watchlist,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "watchlist" => Ok(CollectionKind::Watchlist),
            "favorites" | "favourites" => Ok(CollectionKind::Favorites),
            other => Err(format!("Invalid collection: {}. Use 'watchlist' or 'favorites'", other)),
        }
    }
}

#[derive(Debug, Default)]
struct Sets {
    watchlist: Vec<Movie>,
    favorites: Vec<Movie>,
}

impl Sets {
    fn get(&self, kind: CollectionKind) -> &Vec<Movie> {
        match kind {
            CollectionKind::Watchlist => &self.watchlist,
            CollectionKind::Favorites => &self.favorites,
        }
    }

    fn get_mut(&mut self, kind: CollectionKind) -> &mut Vec<Movie> {
        match kind {
            CollectionKind::Watchlist => &mut self.watchlist,
            CollectionKind::Favorites => &mut self.favorites,
        }
    }
}

/// Watchlist and favorites, kept in insertion order and persisted after
/// every mutation.
///
/// A movie id appears at most once per set; the same movie may be in both.
pub struct CollectionsStore {
    storage: Arc<LocalStorage>,
    sets: RwLock<Sets>,
}

impl CollectionsStore {
    pub fn load(storage: Arc<LocalStorage>) -> Self {
        let mut sets = Sets::default();
        for kind in [CollectionKind::Watchlist, CollectionKind::Favorites] {
            let mut movies: Vec<Movie> = storage.load(kind.storage_key()).unwrap_or_default();
            // Older writes may carry duplicates; keep the first occurrence
            let mut seen = std::collections::HashSet::new();
            movies.retain(|m| seen.insert(m.id));
            debug!("Loaded {} movies into {}", movies.len(), kind);
            *sets.get_mut(kind) = movies;
        }

        Self {
            storage,
            sets: RwLock::new(sets),
        }
    }

    pub fn list(&self, kind: CollectionKind) -> Vec<Movie> {
        self.sets.read().get(kind).clone()
    }

    pub fn len(&self, kind: CollectionKind) -> usize {
        self.sets.read().get(kind).len()
    }

    pub fn is_empty(&self, kind: CollectionKind) -> bool {
        self.len(kind) == 0
    }

    pub fn contains(&self, kind: CollectionKind, movie_id: u64) -> bool {
        self.sets.read().get(kind).iter().any(|m| m.id == movie_id)
    }

    pub fn is_in_watchlist(&self, movie_id: u64) -> bool {
        self.contains(CollectionKind::Watchlist, movie_id)
    }

    pub fn is_favorite(&self, movie_id: u64) -> bool {
        self.contains(CollectionKind::Favorites, movie_id)
    }

    /// Append `movie` unless already present. Returns whether it was added.
    pub fn add(&self, kind: CollectionKind, movie: Movie) -> Result<bool, StorageError> {
        let mut sets = self.sets.write();
        let list = sets.get_mut(kind);
        if list.iter().any(|m| m.id == movie.id) {
            return Ok(false);
        }
        info!("Adding {} ({}) to {}", movie.title, movie.id, kind);
        list.push(movie);
        self.persist(&sets, kind)?;
        Ok(true)
    }

    /// Returns whether anything was removed
    pub fn remove(&self, kind: CollectionKind, movie_id: u64) -> Result<bool, StorageError> {
        let mut sets = self.sets.write();
        let list = sets.get_mut(kind);
        let before = list.len();
        list.retain(|m| m.id != movie_id);
        if list.len() == before {
            return Ok(false);
        }
        info!("Removed {} from {}", movie_id, kind);
        self.persist(&sets, kind)?;
        Ok(true)
    }

    /// Flip favorite membership. Returns true if the movie is now a favorite.
    pub fn toggle_favorite(&self, movie: Movie) -> Result<bool, StorageError> {
        if self.remove(CollectionKind::Favorites, movie.id)? {
            return Ok(false);
        }
        self.add(CollectionKind::Favorites, movie)?;
        Ok(true)
    }

    /// Move a movie from one set to the other under a single lock.
    ///
    /// Absent from `from` means nothing changes anywhere. Returns whether the
    /// movie was moved.
    pub fn move_between(&self, movie_id: u64, from: CollectionKind, to: CollectionKind) -> Result<bool, StorageError> {
        if from == to {
            return Ok(false);
        }

        let mut sets = self.sets.write();
        let source = sets.get_mut(from);
        let Some(index) = source.iter().position(|m| m.id == movie_id) else {
            debug!("Move of {} ignored: not in {}", movie_id, from);
            return Ok(false);
        };
        let movie = source.remove(index);

        let target = sets.get_mut(to);
        let added = !target.iter().any(|m| m.id == movie_id);
        if added {
            target.push(movie.clone());
        }

        // Target is written first; any failed write restores both sets
        if let Err(e) = self.persist(&sets, to).and_then(|()| self.persist(&sets, from)) {
            warn!("Move of {} from {} to {} failed: {}", movie_id, from, to, e);
            if added {
                sets.get_mut(to).pop();
            }
            sets.get_mut(from).insert(index, movie);
            if let Err(restore) = self.persist(&sets, to) {
                warn!("Could not restore {}: {}", to, restore);
            }
            return Err(e);
        }

        info!("Moved {} from {} to {}", movie_id, from, to);
        Ok(true)
    }

    /// Number of favorites per genre, keyed `genre-<id>`
    pub fn favorite_category_counts(&self) -> BTreeMap<String, usize> {
        let sets = self.sets.read();
        let mut counts = BTreeMap::new();
        for genre_id in sets.favorites.iter().flat_map(|m| m.genre_ids.iter()) {
            *counts.entry(format!("genre-{}", genre_id)).or_insert(0) += 1;
        }
        counts
    }

    pub fn clear(&self, kind: CollectionKind) -> Result<(), StorageError> {
        let mut sets = self.sets.write();
        sets.get_mut(kind).clear();
        self.storage.remove(kind.storage_key())?;
        info!("Cleared {}", kind);
        Ok(())
    }

    fn persist(&self, sets: &Sets, kind: CollectionKind) -> Result<(), StorageError> {
        self.storage.save(kind.storage_key(), sets.get(kind))
    }
}
