use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::{
    client::{
        error::ClientResult,
        favorites::{favorite_id_in, Favorites},
    },
    models::{Favorite, Movie},
};

/// What a toggle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added(Favorite),
    Removed(Uuid),
}

/// Adds or removes a movie from favorites, tracking a loading flag per imdbID.
///
/// Toggles for the same movie run one after another, each seeing the list the
/// previous one left behind. Different movies toggle independently.
pub struct ToggleFavorite {
    favorites: Arc<Favorites>,
    /// imdbID -> toggles in flight
    pending: Mutex<HashMap<String, usize>>,
    /// Per-imdbID locks, present only while a toggle for that movie is running
    locks: LockMap,
}

type LockMap = Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>;

/// Holds a per-movie lock; the map entry is removed once no toggle holds it
struct LockEntry<'a> {
    locks: &'a LockMap,
    imdb_id: String,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for LockEntry<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map and this entry hold it: no toggle is waiting
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.imdb_id);
        }
    }
}

/// Keeps a movie marked as loading until dropped, whatever way the toggle ends
struct Loading<'a> {
    pending: &'a Mutex<HashMap<String, usize>>,
    imdb_id: String,
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(count) = pending.get_mut(&self.imdb_id) {
            *count = count.saturating_sub(1);
        }
    }
}

impl ToggleFavorite {
    pub fn new(favorites: Arc<Favorites>) -> Self {
        Self {
            favorites,
            pending: Mutex::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn start_loading(&self, imdb_id: &str) -> Loading<'_> {
        *self.pending().entry(imdb_id.to_string()).or_insert(0) += 1;
        Loading {
            pending: &self.pending,
            imdb_id: imdb_id.to_string(),
        }
    }

    fn lock_for(&self, imdb_id: &str) -> LockEntry<'_> {
        let lock = self
            .locks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(imdb_id.to_string())
            .or_default()
            .clone();

        LockEntry {
            locks: &self.locks,
            imdb_id: imdb_id.to_string(),
            lock,
        }
    }

    /// Removes the movie if it is a favorite, adds it otherwise
    pub async fn toggle(&self, movie: &Movie) -> ClientResult<ToggleOutcome> {
        let _loading = self.start_loading(&movie.imdb_id);

        let entry = self.lock_for(&movie.imdb_id);
        let _serialized = entry.lock.lock().await;

        // Reload if an earlier toggle invalidated the list
        let favorites = self.favorites.favorites().await?;

        match favorite_id_in(&favorites, &movie.imdb_id) {
            Some(id) => {
                self.favorites.remove_favorite(id).await?;
                tracing::debug!(imdb_id = %movie.imdb_id, favorite_id = %id, "Toggled favorite off");
                Ok(ToggleOutcome::Removed(id))
            }
            None => {
                let favorite = self.favorites.add_favorite(movie).await?;
                tracing::debug!(imdb_id = %movie.imdb_id, favorite_id = %favorite.id, "Toggled favorite on");
                Ok(ToggleOutcome::Added(favorite))
            }
        }
    }

    pub fn is_loading(&self, imdb_id: &str) -> bool {
        self.pending().get(imdb_id).is_some_and(|count| *count > 0)
    }

    /// Loading flag of every movie toggled so far
    pub fn loading_states(&self) -> HashMap<String, bool> {
        self.pending()
            .iter()
            .map(|(imdb_id, count)| (imdb_id.clone(), *count > 0))
            .collect()
    }
}
