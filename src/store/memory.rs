use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;

use super::{CatalogStore, StoreResult};
use crate::{
    error::StoreError,
    models::{MovieId, MoviePatch, MovieRecord, NewMovie},
};

#[cfg(test)]
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct CallCounts {
    pub list: usize,
    pub insert: usize,
    pub update: usize,
    pub patch: usize,
    pub delete: usize,
}

/// In-process table used when no hosted store is configured.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Rows>,
    failing: AtomicBool,
    list_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    update_calls: AtomicUsize,
    patch_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

#[derive(Default)]
struct Rows {
    next_id: u64,
    movies: Vec<MovieRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_movies(movies: impl IntoIterator<Item = NewMovie>) -> Self {
        let store = Self::new();
        {
            let mut rows = store.rows.lock().unwrap_or_else(|p| p.into_inner());
            for movie in movies {
                rows.push(movie);
            }
        }
        store
    }

    /// Makes every subsequent call fail as if the network were down.
    #[cfg(test)]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    #[cfg(test)]
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            list: self.list_calls.load(Ordering::SeqCst),
            insert: self.insert_calls.load(Ordering::SeqCst),
            update: self.update_calls.load(Ordering::SeqCst),
            patch: self.patch_calls.load(Ordering::SeqCst),
            delete: self.delete_calls.load(Ordering::SeqCst),
        }
    }

    fn begin(&self, counter: &AtomicUsize) -> StoreResult<std::sync::MutexGuard<'_, Rows>> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(self.rows.lock().unwrap_or_else(|p| p.into_inner()))
    }
}

impl Rows {
    fn push(&mut self, movie: NewMovie) -> MovieRecord {
        self.next_id += 1;
        let record = MovieRecord { id: MovieId::new(self.next_id.to_string()), fields: movie };
        self.movies.push(record.clone());
        record
    }

    fn find_mut(&mut self, id: &MovieId) -> StoreResult<&mut MovieRecord> {
        self.movies.iter_mut().find(|m| &m.id == id).ok_or(StoreError::EmptyResponse)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_all(&self) -> StoreResult<Vec<MovieRecord>> {
        let rows = self.begin(&self.list_calls)?;
        Ok(rows.movies.clone())
    }

    async fn insert(&self, movie: &NewMovie) -> StoreResult<MovieRecord> {
        let mut rows = self.begin(&self.insert_calls)?;
        Ok(rows.push(movie.clone()))
    }

    async fn update(&self, id: &MovieId, movie: &NewMovie) -> StoreResult<MovieRecord> {
        let mut rows = self.begin(&self.update_calls)?;
        let record = rows.find_mut(id)?;
        record.fields = movie.clone();
        Ok(record.clone())
    }

    async fn patch(&self, id: &MovieId, patch: MoviePatch) -> StoreResult<MovieRecord> {
        let mut rows = self.begin(&self.patch_calls)?;
        let record = rows.find_mut(id)?;
        patch.apply(&mut record.fields);
        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: &MovieId) -> StoreResult<()> {
        let mut rows = self.begin(&self.delete_calls)?;
        rows.movies.retain(|m| &m.id != id);
        Ok(())
    }
}
