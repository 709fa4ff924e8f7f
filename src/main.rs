mod admin;
mod catalog;
mod config;
mod db;
mod entities;
mod error;
mod filter;
mod models;
mod notice;
mod routes;
mod session;
mod settings;
mod slider;
mod store;
mod templates;

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use tokio::sync::{Mutex, RwLock};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    admin::AdminController,
    catalog::CatalogCache,
    config::Config,
    error::AdminError,
    notice::NoticeBoard,
    session::SessionGate,
    settings::{KeyValueStore, SqliteKeyValueStore},
    slider::SliderController,
    store::{CatalogStore, MemoryStore, SupabaseStore},
};

pub struct AppState {
    pub catalog: Arc<RwLock<CatalogCache>>,
    pub admin: AdminController,
    pub gate: RwLock<SessionGate>,
    pub slider: Mutex<SliderController>,
    pub notices: NoticeBoard,
    cookie_key: CookieKey,
}

/// Encrypts the admin session cookie. Generated per process, so sessions end on restart.
#[derive(Clone)]
pub struct CookieKey(Key);

impl From<CookieKey> for Key {
    fn from(key: CookieKey) -> Self {
        key.0
    }
}

impl AppState {
    pub async fn new(
        config: &Config,
        store: Arc<dyn CatalogStore>,
        settings: Arc<dyn KeyValueStore>,
    ) -> Result<Self, AdminError> {
        let catalog = Arc::new(RwLock::new(CatalogCache::default()));
        let gate = SessionGate::load(settings, &config.default_admin_password).await?;

        Ok(Self {
            admin: AdminController::new(store, catalog.clone()),
            catalog,
            gate: RwLock::new(gate),
            slider: Mutex::new(SliderController::new()),
            notices: NoticeBoard::new(config.notice_ttl),
            cookie_key: CookieKey(Key::generate()),
        })
    }
}

impl FromRef<Arc<AppState>> for CookieKey {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.cookie_key.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,marquee=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let store: Arc<dyn CatalogStore> = match &config.supabase {
        Some(supabase) => {
            let http = reqwest::Client::builder()
                .user_agent("marquee/0.1")
                .timeout(config.http_timeout)
                .build()?;
            Arc::new(SupabaseStore::new(
                http,
                supabase.url.clone(),
                supabase.anon_key.clone(),
                supabase.table.clone(),
                config.store_rps,
            ))
        },
        None => {
            tracing::warn!(
                "SUPABASE_URL / SUPABASE_ANON_KEY missing - catalog is kept in memory only"
            );
            Arc::new(MemoryStore::new())
        },
    };

    let db = db::connect_and_migrate(&config.database_url).await?;
    let settings = Arc::new(SqliteKeyValueStore::new(db));

    let state = Arc::new(AppState::new(&config, store, settings).await?);

    // A failed initial load leaves an empty catalog; the admin can reload later.
    if let Err(err) = state.admin.refresh().await {
        tracing::error!(error = %err, "initial catalog load failed");
    }

    slider::spawn_ticker(state.clone(), config.slide_interval);

    let app = routes::router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
