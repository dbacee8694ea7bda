use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::FavoritesRepository,
    error::{AppError, AppResult},
    models::{Favorite, NewFavorite},
};

/// Favorites kept in process memory
#[derive(Clone, Default)]
pub struct InMemoryFavoritesRepository {
    inner: Arc<RwLock<Store>>,
}

#[derive(Default)]
struct Store {
    favorites: HashMap<Uuid, Entry>,
    /// imdbID -> favorite id
    by_imdb_id: HashMap<String, Uuid>,
    next_seq: u64,
}

struct Entry {
    favorite: Favorite,
    /// Insertion order, used to break `added_at` ties
    seq: u64,
}

impl InMemoryFavoritesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.favorites.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl FavoritesRepository for InMemoryFavoritesRepository {
    async fn add_favorite(&self, candidate: NewFavorite) -> AppResult<Favorite> {
        let mut store = self.inner.write().await;

        if store.by_imdb_id.contains_key(&candidate.imdb_id) {
            return Err(AppError::Conflict(
                "Movie is already in favorites".to_string(),
            ));
        }

        let favorite = Favorite::from_candidate(candidate);
        let seq = store.next_seq;
        store.next_seq += 1;
        store
            .by_imdb_id
            .insert(favorite.imdb_id.clone(), favorite.id);
        store.favorites.insert(
            favorite.id,
            Entry {
                favorite: favorite.clone(),
                seq,
            },
        );

        tracing::info!(
            favorite_id = %favorite.id,
            imdb_id = %favorite.imdb_id,
            title = %favorite.title,
            "Added favorite"
        );

        Ok(favorite)
    }

    async fn remove_favorite(&self, id: Uuid) -> AppResult<bool> {
        let mut store = self.inner.write().await;

        match store.favorites.remove(&id) {
            Some(entry) => {
                store.by_imdb_id.remove(&entry.favorite.imdb_id);
                tracing::info!(favorite_id = %id, "Removed favorite");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_favorites(&self) -> AppResult<Vec<Favorite>> {
        let store = self.inner.read().await;

        let mut entries: Vec<&Entry> = store.favorites.values().collect();
        entries.sort_by(|a, b| {
            b.favorite
                .added_at
                .cmp(&a.favorite.added_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        Ok(entries.into_iter().map(|e| e.favorite.clone()).collect())
    }

    async fn find_by_imdb_id(&self, imdb_id: &str) -> AppResult<Option<Favorite>> {
        let store = self.inner.read().await;

        Ok(store
            .by_imdb_id
            .get(imdb_id)
            .and_then(|id| store.favorites.get(id))
            .map(|entry| entry.favorite.clone()))
    }
}
