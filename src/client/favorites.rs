use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    cached_query,
    client::{
        api::MovieBackend,
        cache::{QueryCache, QueryKey},
        error::ClientResult,
    },
    models::{Favorite, Movie},
};

/// Favorites list backed by the query cache.
///
/// `favorites()` fetches once per invalidation; `is_favorite` and `favorite_id`
/// only look at what was last fetched. Adding or removing invalidates the list.
pub struct Favorites {
    backend: Arc<dyn MovieBackend>,
    cache: Arc<QueryCache>,
    loading: AtomicUsize,
    adding: AtomicUsize,
    removing: AtomicUsize,
}

/// Counts an operation as in flight until dropped
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Favorites {
    pub fn new(backend: Arc<dyn MovieBackend>, cache: Arc<QueryCache>) -> Self {
        Self {
            backend,
            cache,
            loading: AtomicUsize::new(0),
            adding: AtomicUsize::new(0),
            removing: AtomicUsize::new(0),
        }
    }

    /// The favorites list, from cache or freshly fetched after an invalidation
    pub async fn favorites(&self) -> ClientResult<Vec<Favorite>> {
        cached_query!(self.cache, QueryKey::Favorites, async {
            let _loading = InFlight::start(&self.loading);
            self.backend.get_favorites().await
        })
    }

    /// Drops the cached list and fetches it again
    pub async fn refresh(&self) -> ClientResult<Vec<Favorite>> {
        self.cache.invalidate(&QueryKey::Favorites);
        self.favorites().await
    }

    /// The last fetched list; empty before the first fetch
    pub fn cached(&self) -> Vec<Favorite> {
        self.cache.get(&QueryKey::Favorites).unwrap_or_default()
    }

    pub fn is_favorite(&self, imdb_id: &str) -> bool {
        self.cached().iter().any(|fav| fav.imdb_id == imdb_id)
    }

    pub fn favorite_id(&self, imdb_id: &str) -> Option<Uuid> {
        favorite_id_in(&self.cached(), imdb_id)
    }

    pub async fn add_favorite(&self, movie: &Movie) -> ClientResult<Favorite> {
        let _adding = InFlight::start(&self.adding);

        let favorite = self.backend.add_favorite(movie).await?;
        self.cache.invalidate(&QueryKey::Favorites);
        Ok(favorite)
    }

    pub async fn remove_favorite(&self, id: Uuid) -> ClientResult<()> {
        let _removing = InFlight::start(&self.removing);

        self.backend.remove_favorite(id).await?;
        self.cache.invalidate(&QueryKey::Favorites);
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst) > 0
    }

    pub fn is_adding(&self) -> bool {
        self.adding.load(Ordering::SeqCst) > 0
    }

    pub fn is_removing(&self) -> bool {
        self.removing.load(Ordering::SeqCst) > 0
    }
}

/// Id of the favorite for `imdb_id` within `favorites`
pub fn favorite_id_in(favorites: &[Favorite], imdb_id: &str) -> Option<Uuid> {
    favorites
        .iter()
        .find(|fav| fav.imdb_id == imdb_id)
        .map(|fav| fav.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::MockMovieBackend;
    use crate::client::error::ClientError;
    use crate::models::NewFavorite;
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use std::sync::Mutex;
    use std::time::Duration;

    fn movie(imdb_id: &str) -> Movie {
        Movie {
            imdb_id: imdb_id.to_string(),
            title: "A".to_string(),
            year: "2020".to_string(),
            poster: String::new(),
        }
    }

    fn favorite(imdb_id: &str) -> Favorite {
        Favorite::from_candidate(NewFavorite::from(movie(imdb_id)))
    }

    fn favorites_with(backend: MockMovieBackend) -> Favorites {
        Favorites::new(Arc::new(backend), Arc::new(QueryCache::new()))
    }

    #[tokio::test]
    async fn test_fetches_once_until_invalidated() {
        let stored = favorite("tt1");
        let mut backend = MockMovieBackend::new();
        backend
            .expect_get_favorites()
            .times(1)
            .returning(move || Ok(vec![stored.clone()]));
        let favorites = favorites_with(backend);

        assert_eq!(favorites.favorites().await.unwrap().len(), 1);
        assert_eq!(favorites.favorites().await.unwrap().len(), 1);
        assert!(!favorites.is_loading());
    }

    #[tokio::test]
    async fn test_lookups_use_fetched_list() {
        let stored = favorite("tt1");
        let stored_id = stored.id;
        let mut backend = MockMovieBackend::new();
        backend
            .expect_get_favorites()
            .returning(move || Ok(vec![stored.clone()]));
        let favorites = favorites_with(backend);

        assert!(!favorites.is_favorite("tt1"));
        favorites.favorites().await.unwrap();

        assert!(favorites.is_favorite("tt1"));
        assert!(!favorites.is_favorite("tt2"));
        assert_eq!(favorites.favorite_id("tt1"), Some(stored_id));
        assert_eq!(favorites.favorite_id("tt2"), None);
    }

    #[tokio::test]
    async fn test_add_invalidates_list() {
        let added = favorite("tt2");
        let mut backend = MockMovieBackend::new();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_get_favorites()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Vec::new()));
        let returned = added.clone();
        backend
            .expect_add_favorite()
            .withf(|movie| movie.imdb_id == "tt2")
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(returned.clone()));
        let listed = added.clone();
        backend
            .expect_get_favorites()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(vec![listed.clone()]));
        let favorites = favorites_with(backend);

        favorites.favorites().await.unwrap();
        assert!(!favorites.is_favorite("tt2"));

        favorites.add_favorite(&movie("tt2")).await.unwrap();
        assert!(!favorites.is_adding());

        assert_eq!(favorites.favorites().await.unwrap(), vec![added]);
        assert!(favorites.is_favorite("tt2"));
    }

    #[tokio::test]
    async fn test_remove_invalidates_list() {
        let stored = favorite("tt1");
        let id = stored.id;
        let mut backend = MockMovieBackend::new();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_get_favorites()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(vec![stored.clone()]));
        backend
            .expect_remove_favorite()
            .with(eq(id))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        backend
            .expect_get_favorites()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Vec::new()));
        let favorites = favorites_with(backend);

        favorites.favorites().await.unwrap();
        favorites.remove_favorite(id).await.unwrap();

        assert!(favorites.favorites().await.unwrap().is_empty());
        assert!(!favorites.is_removing());
    }

    #[tokio::test]
    async fn test_failed_add_keeps_cached_list() {
        let mut backend = MockMovieBackend::new();
        backend
            .expect_get_favorites()
            .times(1)
            .returning(|| Ok(Vec::new()));
        backend.expect_add_favorite().returning(|_| {
            Err(ClientError::Status {
                status: 409,
                message: "Movie is already in favorites".to_string(),
            })
        });
        let favorites = favorites_with(backend);

        favorites.favorites().await.unwrap();
        let err = favorites.add_favorite(&movie("tt1")).await.unwrap_err();

        assert!(err.is_conflict());
        assert!(!favorites.is_adding());
        // Still served from cache: get_favorites is expected exactly once
        favorites.favorites().await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_refetches_cached_list() {
        let mut backend = MockMovieBackend::new();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_get_favorites()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Vec::new()));
        let stored = favorite("tt1");
        backend
            .expect_get_favorites()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(vec![stored.clone()]));
        let favorites = favorites_with(backend);

        assert!(favorites.favorites().await.unwrap().is_empty());
        assert_eq!(favorites.refresh().await.unwrap().len(), 1);
        assert!(favorites.is_favorite("tt1"));
    }

    #[test]
    fn test_favorite_id_in() {
        let list = vec![favorite("tt1"), favorite("tt2")];
        assert_eq!(favorite_id_in(&list, "tt2"), Some(list[1].id));
        assert_eq!(favorite_id_in(&list, "tt3"), None);
    }

    /// Backend whose list reads take a snapshot and then stall
    #[derive(Default)]
    struct SnapshotBackend {
        favorites: Mutex<Vec<Favorite>>,
    }

    #[async_trait]
    impl MovieBackend for SnapshotBackend {
        async fn search_movies(&self, _query: &str, _page: u32) -> ClientResult<Vec<Movie>> {
            Ok(Vec::new())
        }

        async fn get_favorites(&self) -> ClientResult<Vec<Favorite>> {
            let snapshot = self.favorites.lock().unwrap().clone();
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(snapshot)
        }

        async fn add_favorite(&self, movie: &Movie) -> ClientResult<Favorite> {
            let favorite = Favorite::from_candidate(NewFavorite::from(movie.clone()));
            self.favorites.lock().unwrap().push(favorite.clone());
            Ok(favorite)
        }

        async fn remove_favorite(&self, id: Uuid) -> ClientResult<()> {
            self.favorites.lock().unwrap().retain(|fav| fav.id != id);
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_overlapping_add_does_not_cache_old_list() {
        let backend = Arc::new(SnapshotBackend::default());
        let favorites = Favorites::new(backend.clone(), Arc::new(QueryCache::new()));

        let (before_add, _) = tokio::join!(favorites.favorites(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            favorites.add_favorite(&movie("tt1")).await.unwrap()
        });

        // The overlapping read saw the list from before the add
        assert!(before_add.unwrap().is_empty());

        assert_eq!(favorites.favorites().await.unwrap().len(), 1);
        assert!(favorites.is_favorite("tt1"));
        assert_eq!(backend.favorites.lock().unwrap().len(), 1);
    }
}
