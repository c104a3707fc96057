pub mod models;

use crate::infrastructure::config::parse_or;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

pub type DbPool = Pool<Postgres>;

/// Pool sizing read from `DB_*` variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl PoolSettings {
    pub fn from_env() -> Self {
        Self {
            max_connections: parse_or("DB_MAX_CONNECTIONS", 20),
            min_connections: parse_or("DB_MIN_CONNECTIONS", 5),
            acquire_timeout: Duration::from_secs(parse_or("DB_ACQUIRE_TIMEOUT_SECS", 3)),
            idle_timeout: Duration::from_secs(parse_or("DB_IDLE_TIMEOUT_SECS", 600)),
        }
    }
}

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let settings = PoolSettings::from_env();
    tracing::debug!(?settings, "Connecting to database");

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections.min(settings.max_connections))
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .connect(database_url)
        .await
}

/// Applies the embedded migrations.
pub async fn migrate(pool: &DbPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}
