//! Storage backends for the leaderboard.
//!
//! Every method is atomic on its own. Nothing spans two calls, so callers
//! composing several primitives can interleave with other requests.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::ColleagueRecord;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Add missing names with zeroed counters, keeping existing records untouched.
    async fn seed(&self, names: &[String]) -> Result<(), StoreError>;

    /// All records in seed order.
    async fn all(&self) -> Result<Vec<ColleagueRecord>, StoreError>;

    async fn get(&self, name: &str) -> Result<Option<ColleagueRecord>, StoreError>;

    /// `bounce_count += 1`. Returns `None` for an unknown name.
    async fn increment_bounce(&self, name: &str) -> Result<Option<ColleagueRecord>, StoreError>;

    /// `win_count += 1` and `bounce_count = 0` for one record.
    async fn award_win(&self, name: &str) -> Result<Option<ColleagueRecord>, StoreError>;

    /// `bounce_count = 0` for every record.
    async fn clear_bounces(&self) -> Result<(), StoreError>;

    /// Both counters to zero for every record.
    async fn reset_all(&self) -> Result<(), StoreError>;
}
