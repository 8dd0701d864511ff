use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::LeaderboardStore;
use crate::db;
use crate::error::StoreError;
use crate::models::ColleagueRecord;

/// Durable store backed by the `colleagues` table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `database_url`, creating the file and schema if missing.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// Private in-memory database on a single pinned connection.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        db::create_schema(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl LeaderboardStore for SqliteStore {
    async fn seed(&self, names: &[String]) -> Result<(), StoreError> {
        Ok(db::seed_colleagues(&self.pool, names).await?)
    }

    async fn all(&self) -> Result<Vec<ColleagueRecord>, StoreError> {
        Ok(db::get_all_colleagues(&self.pool).await?)
    }

    async fn get(&self, name: &str) -> Result<Option<ColleagueRecord>, StoreError> {
        Ok(db::get_colleague(&self.pool, name).await?)
    }

    async fn increment_bounce(&self, name: &str) -> Result<Option<ColleagueRecord>, StoreError> {
        Ok(db::increment_bounce(&self.pool, name).await?)
    }

    async fn award_win(&self, name: &str) -> Result<Option<ColleagueRecord>, StoreError> {
        Ok(db::award_win(&self.pool, name).await?)
    }

    async fn clear_bounces(&self) -> Result<(), StoreError> {
        Ok(db::clear_bounces(&self.pool).await?)
    }

    async fn reset_all(&self) -> Result<(), StoreError> {
        Ok(db::reset_all(&self.pool).await?)
    }
}
