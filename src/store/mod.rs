mod memory;
mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use async_trait::async_trait;

use crate::{
    error::StoreError,
    models::{MovieId, MoviePatch, MovieRecord, NewMovie},
};

pub type StoreResult<T> = Result<T, StoreError>;

/// The hosted table of movie records.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_all(&self) -> StoreResult<Vec<MovieRecord>>;

    /// Inserts a record; the store assigns the identifier.
    async fn insert(&self, movie: &NewMovie) -> StoreResult<MovieRecord>;

    /// Replaces every field of the record with `id`.
    async fn update(&self, id: &MovieId, movie: &NewMovie) -> StoreResult<MovieRecord>;

    async fn patch(&self, id: &MovieId, patch: MoviePatch) -> StoreResult<MovieRecord>;

    async fn delete_by_id(&self, id: &MovieId) -> StoreResult<()>;
}
