use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    catalog::CatalogCache,
    error::{AdminError, StoreOp, ValidationError},
    models::{MovieId, MoviePatch, MovieRecord, NewMovie},
    store::CatalogStore,
};

/// Writes go to the store first; the cache follows only after the store accepts.
#[derive(Clone)]
pub struct AdminController {
    store: Arc<dyn CatalogStore>,
    catalog: Arc<RwLock<CatalogCache>>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Flag {
    Featured,
    Trending,
}

impl AdminController {
    pub fn new(store: Arc<dyn CatalogStore>, catalog: Arc<RwLock<CatalogCache>>) -> Self {
        Self { store, catalog }
    }

    /// Rebuilds the cache from the store.
    pub async fn refresh(&self) -> Result<usize, AdminError> {
        let movies = self.store.list_all().await.map_err(AdminError::remote(StoreOp::Fetch));
        let movies = log_failure(movies)?;
        let count = movies.len();
        self.catalog.write().await.reload(movies);
        info!(count, "catalog loaded");
        Ok(count)
    }

    pub async fn create(&self, mut movie: NewMovie) -> Result<MovieRecord, AdminError> {
        if !movie.has_required_fields() {
            return Err(ValidationError::MissingRequiredFields.into());
        }
        movie.views = "0".to_string();

        let created = self.store.insert(&movie).await.map_err(AdminError::remote(StoreOp::Add));
        let created = log_failure(created)?;
        self.catalog.write().await.append(created.clone());
        info!(id = %created.id, title = %created.title(), "movie added");
        Ok(created)
    }

    pub async fn update(&self, id: &MovieId, movie: NewMovie) -> Result<MovieRecord, AdminError> {
        let updated =
            self.store.update(id, &movie).await.map_err(AdminError::remote(StoreOp::Update));
        let updated = log_failure(updated)?;
        self.catalog.write().await.replace(updated.clone());
        info!(id = %id, "movie updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &MovieId) -> Result<(), AdminError> {
        let deleted = self.store.delete_by_id(id).await.map_err(AdminError::remote(StoreOp::Delete));
        log_failure(deleted)?;
        self.catalog.write().await.remove(id);
        info!(id = %id, "movie deleted");
        Ok(())
    }

    pub async fn toggle_featured(&self, id: &MovieId) -> Result<MovieRecord, AdminError> {
        self.toggle(id, Flag::Featured).await
    }

    pub async fn toggle_trending(&self, id: &MovieId) -> Result<MovieRecord, AdminError> {
        self.toggle(id, Flag::Trending).await
    }

    async fn toggle(&self, id: &MovieId, flag: Flag) -> Result<MovieRecord, AdminError> {
        let patch = {
            let catalog = self.catalog.read().await;
            let movie = catalog.get(id).ok_or_else(|| AdminError::UnknownMovie(id.clone()))?;
            match flag {
                Flag::Featured => MoviePatch::featured(!movie.fields.is_featured),
                Flag::Trending => MoviePatch::trending(!movie.fields.is_trending),
            }
        };
        let op = match flag {
            Flag::Featured => StoreOp::Featured,
            Flag::Trending => StoreOp::Trending,
        };

        let updated = self.store.patch(id, patch).await.map_err(AdminError::remote(op));
        let updated = log_failure(updated)?;
        self.catalog.write().await.replace(updated.clone());
        info!(id = %id, ?flag, "movie flag toggled");
        Ok(updated)
    }
}

fn log_failure<T>(result: Result<T, AdminError>) -> Result<T, AdminError> {
    if let Err(err) = &result {
        warn!(error = %err, "store call failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::StoreError, store::MemoryStore};

    fn draft(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            thumbnail: "https://img.example/poster.jpg".to_string(),
            url: "https://watch.example/movie".to_string(),
            genre: "Action".to_string(),
            views: "99K".to_string(),
            ..NewMovie::default()
        }
    }

    async fn loaded(store: MemoryStore) -> (Arc<MemoryStore>, AdminController, Arc<RwLock<CatalogCache>>) {
        let store = Arc::new(store);
        let catalog = Arc::new(RwLock::new(CatalogCache::default()));
        let admin = AdminController::new(store.clone(), catalog.clone());
        admin.refresh().await.unwrap();
        (store, admin, catalog)
    }

    #[tokio::test]
    async fn create_without_title_never_reaches_store() {
        let (store, admin, catalog) = loaded(MemoryStore::new()).await;

        let err = admin.create(draft("")).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(ValidationError::MissingRequiredFields)));
        assert_eq!(err.notice_message(), "Please fill all required fields!");
        assert_eq!(store.calls().insert, 0);
        assert!(catalog.read().await.movies().is_empty());
    }

    #[tokio::test]
    async fn create_inserts_once_and_appends() {
        let (store, admin, catalog) = loaded(MemoryStore::with_movies([draft("Old")])).await;

        let created = admin.create(draft("New")).await.unwrap();
        assert_eq!(store.calls().insert, 1);
        assert_eq!(created.fields.views, "0");

        let catalog = catalog.read().await;
        let titles: Vec<&str> = catalog.movies().iter().map(|m| m.title()).collect();
        assert_eq!(titles, ["Old", "New"]);
        assert_eq!(catalog.movies()[1].id, created.id);
    }

    #[tokio::test]
    async fn failed_create_leaves_cache_alone() {
        let (store, admin, catalog) = loaded(MemoryStore::with_movies([draft("Old")])).await;
        store.set_failing(true);

        let err = admin.create(draft("New")).await.unwrap_err();
        assert_eq!(err.notice_message(), "Failed to add movie!");
        assert_eq!(catalog.read().await.movies().len(), 1);
    }

    #[tokio::test]
    async fn toggle_featured_replaces_only_that_record() {
        let (store, admin, catalog) =
            loaded(MemoryStore::with_movies([draft("A"), draft("B"), draft("C")])).await;
        let before = catalog.read().await.movies().to_vec();

        let id = MovieId::new("2");
        let updated = admin.toggle_featured(&id).await.unwrap();
        assert!(updated.fields.is_featured);
        assert_eq!(store.calls().patch, 1);

        let after = catalog.read().await.movies().to_vec();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert!(after[1].fields.is_featured);
        assert!(!after[1].fields.is_trending);

        admin.toggle_featured(&id).await.unwrap();
        assert!(!catalog.read().await.get(&id).unwrap().fields.is_featured);
    }

    #[tokio::test]
    async fn toggle_trending_failure_keeps_flag() {
        let (store, admin, catalog) = loaded(MemoryStore::with_movies([draft("A")])).await;
        store.set_failing(true);

        let err = admin.toggle_trending(&MovieId::new("1")).await.unwrap_err();
        assert_eq!(err.notice_message(), "Failed to update trending status!");
        assert!(!catalog.read().await.movies()[0].fields.is_trending);
    }

    #[tokio::test]
    async fn toggle_unknown_movie_skips_store() {
        let (store, admin, _) = loaded(MemoryStore::new()).await;
        let err = admin.toggle_featured(&MovieId::new("404")).await.unwrap_err();
        assert!(matches!(err, AdminError::UnknownMovie(_)));
        assert_eq!(store.calls().patch, 0);
    }

    #[tokio::test]
    async fn update_and_delete_follow_the_store() {
        let (_, admin, catalog) = loaded(MemoryStore::with_movies([draft("A"), draft("B")])).await;

        let id = MovieId::new("1");
        let mut edited = draft("A (Director's Cut)");
        edited.quality = crate::models::Quality::Uhd4k;
        admin.update(&id, edited).await.unwrap();
        assert_eq!(catalog.read().await.get(&id).unwrap().title(), "A (Director's Cut)");

        admin.delete(&id).await.unwrap();
        let catalog = catalog.read().await;
        assert!(catalog.get(&id).is_none());
        assert_eq!(catalog.movies().len(), 1);
    }

    #[tokio::test]
    async fn failed_update_and_delete_leave_cache_alone() {
        let (store, admin, catalog) = loaded(MemoryStore::with_movies([draft("A"), draft("B")])).await;
        let before = catalog.read().await.movies().to_vec();
        store.set_failing(true);

        let id = MovieId::new("1");
        let err = admin.update(&id, draft("Renamed")).await.unwrap_err();
        assert_eq!(err.notice_message(), "Failed to update movie!");

        let err = admin.delete(&id).await.unwrap_err();
        assert_eq!(err.notice_message(), "Failed to delete movie!");

        assert_eq!(catalog.read().await.movies(), before.as_slice());
        assert_eq!(store.calls().update, 1);
        assert_eq!(store.calls().delete, 1);
    }

    #[tokio::test]
    async fn update_of_row_gone_from_store_fails() {
        let (store, admin, catalog) = loaded(MemoryStore::with_movies([draft("A")])).await;
        let id = MovieId::new("1");
        store.delete_by_id(&id).await.unwrap();

        let err = admin.update(&id, draft("Renamed")).await.unwrap_err();
        assert!(matches!(
            err,
            AdminError::Remote { op: StoreOp::Update, source: StoreError::EmptyResponse }
        ));
        assert_eq!(err.notice_message(), "Failed to update movie!");
        assert_eq!(catalog.read().await.get(&id).unwrap().title(), "A");
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_cache() {
        let (store, admin, catalog) = loaded(MemoryStore::with_movies([draft("A")])).await;
        store.set_failing(true);

        let err = admin.refresh().await.unwrap_err();
        assert_eq!(err.notice_message(), "Failed to fetch movies!");
        assert_eq!(catalog.read().await.movies().len(), 1);
    }
}
