use std::{num::NonZeroU32, sync::Arc};

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;

use super::{CatalogStore, StoreResult};
use crate::{
    error::StoreError,
    models::{MovieId, MoviePatch, MovieRecord, NewMovie},
};

/// PostgREST client for the hosted `movies` table.
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    table: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl SupabaseStore {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        anon_key: String,
        table: String,
        rps: u32,
    ) -> Self {
        let rps = NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(rps)));
        Self { client, base_url, anon_key, table, limiter }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }

    async fn request(&self, method: reqwest::Method, id: Option<&MovieId>) -> RequestBuilder {
        self.limiter.until_ready().await;

        let mut req = self
            .client
            .request(method, self.table_url())
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key);
        if let Some(id) = id {
            req = req.query(&[("id", format!("eq.{id}"))]);
        }
        req
    }

    async fn write_returning<T: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        id: Option<&MovieId>,
        body: &T,
    ) -> StoreResult<MovieRecord> {
        let resp = self
            .request(method, id)
            .await
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let rows: Vec<MovieRecord> = decode(resp).await?;
        rows.into_iter().next().ok_or(StoreError::EmptyResponse)
    }
}

async fn checked(resp: Response) -> StoreResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Status { status, body })
}

async fn decode(resp: Response) -> StoreResult<Vec<MovieRecord>> {
    let bytes = checked(resp).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl CatalogStore for SupabaseStore {
    async fn list_all(&self) -> StoreResult<Vec<MovieRecord>> {
        let resp = self
            .request(reqwest::Method::GET, None)
            .await
            .query(&[("select", "*")])
            .send()
            .await?;
        let rows = decode(resp).await?;
        debug!(count = rows.len(), table = %self.table, "listed movies");
        Ok(rows)
    }

    async fn insert(&self, movie: &NewMovie) -> StoreResult<MovieRecord> {
        let record =
            self.write_returning(reqwest::Method::POST, None, std::slice::from_ref(movie)).await?;
        debug!(id = %record.id, "inserted movie");
        Ok(record)
    }

    async fn update(&self, id: &MovieId, movie: &NewMovie) -> StoreResult<MovieRecord> {
        self.write_returning(reqwest::Method::PATCH, Some(id), movie).await
    }

    async fn patch(&self, id: &MovieId, patch: MoviePatch) -> StoreResult<MovieRecord> {
        self.write_returning(reqwest::Method::PATCH, Some(id), &patch).await
    }

    async fn delete_by_id(&self, id: &MovieId) -> StoreResult<()> {
        let resp = self.request(reqwest::Method::DELETE, Some(id)).await.send().await?;
        checked(resp).await?;
        debug!(id = %id, "deleted movie");
        Ok(())
    }
}
