use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    /// Hosted table endpoint; without it the catalog lives in memory only.
    pub supabase: Option<SupabaseConfig>,
    pub database_url: String,
    pub default_admin_password: String,
    pub slide_interval: Duration,
    pub notice_ttl: Duration,
    pub store_rps: u32,
    pub http_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub table: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let supabase_url = std::env::var("SUPABASE_URL").ok().filter(|s| !s.trim().is_empty());
        let supabase_key =
            std::env::var("SUPABASE_ANON_KEY").ok().filter(|s| !s.trim().is_empty());
        let table = std::env::var("SUPABASE_TABLE").unwrap_or_else(|_| "movies".to_string());
        let supabase = match (supabase_url, supabase_key) {
            (Some(url), Some(anon_key)) => Some(SupabaseConfig { url, anon_key, table }),
            _ => None,
        };

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://marquee.db?mode=rwc".to_string());

        let default_admin_password =
            std::env::var("DEFAULT_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        let slide_secs: u64 =
            std::env::var("SLIDE_INTERVAL_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(5);

        let notice_secs: u64 =
            std::env::var("NOTICE_TTL_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(3);

        let store_rps: u32 =
            std::env::var("STORE_RPS").ok().and_then(|s| s.parse().ok()).unwrap_or(10);

        let timeout_secs: u64 =
            std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(30);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            supabase,
            database_url,
            default_admin_password,
            slide_interval: Duration::from_secs(slide_secs.max(1)),
            notice_ttl: Duration::from_secs(notice_secs),
            store_rps,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
