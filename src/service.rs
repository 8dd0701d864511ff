use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::{BounceOutcome, ColleagueRecord};
use crate::store::LeaderboardStore;

/// Leaderboard rules on top of an injected store.
#[derive(Clone)]
pub struct Leaderboard {
    store: Arc<dyn LeaderboardStore>,
    threshold: i64,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn LeaderboardStore>, threshold: i64) -> Self {
        Self { store, threshold }
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    pub async fn get_all(&self) -> Result<Vec<ColleagueRecord>, ServiceError> {
        Ok(self.store.all().await?)
    }

    pub async fn get(&self, name: &str) -> Result<ColleagueRecord, ServiceError> {
        self.store
            .get(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))
    }

    /// Count one bounce for `name`. Reaching the threshold awards a win to
    /// `name` and clears every colleague's bounces.
    ///
    /// The win transition runs as separate store calls after the increment,
    /// so a bounce landing in between may be cleared with the rest.
    pub async fn increment(&self, name: &str) -> Result<BounceOutcome, ServiceError> {
        let record = self
            .store
            .increment_bounce(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))?;

        if record.bounce_count < self.threshold {
            return Ok(BounceOutcome { record, winner: false });
        }

        let record = self
            .store
            .award_win(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(name.to_string()))?;
        self.store.clear_bounces().await?;

        tracing::info!(name = %record.name, wins = record.win_count, "Colleague won the round");

        Ok(BounceOutcome { record, winner: true })
    }

    pub async fn reset(&self) -> Result<(), ServiceError> {
        self.store.reset_all().await?;
        tracing::info!("Leaderboard reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_WIN_THRESHOLD;
    use crate::store::{MemoryStore, SqliteStore};

    async fn seed(store: Arc<dyn LeaderboardStore>, threshold: i64) -> Leaderboard {
        let names: Vec<String> = ["Kent", "Rain", "Dos"].iter().map(|n| n.to_string()).collect();
        store.seed(&names).await.unwrap();
        Leaderboard::new(store, threshold)
    }

    async fn backends(threshold: i64) -> Vec<Leaderboard> {
        vec![
            seed(Arc::new(MemoryStore::new()), threshold).await,
            seed(Arc::new(SqliteStore::in_memory().await.unwrap()), threshold).await,
        ]
    }

    #[tokio::test]
    async fn increment_adds_exactly_one() {
        for board in backends(DEFAULT_WIN_THRESHOLD).await {
            let outcome = board.increment("Rain").await.unwrap();
            assert!(!outcome.winner);
            assert_eq!(outcome.record.bounce_count, 1);
            assert_eq!(board.get("Rain").await.unwrap().bounce_count, 1);
            assert_eq!(board.get("Kent").await.unwrap().bounce_count, 0);
        }
    }

    #[tokio::test]
    async fn unknown_name_leaves_state_untouched() {
        for board in backends(DEFAULT_WIN_THRESHOLD).await {
            board.increment("Kent").await.unwrap();
            let before = board.get_all().await.unwrap();

            let err = board.increment("Nobody").await.unwrap_err();
            assert!(matches!(err, ServiceError::NotFound(ref n) if n == "Nobody"));
            assert_eq!(board.get_all().await.unwrap(), before);
        }
    }

    #[tokio::test]
    async fn reaching_threshold_awards_win_and_clears_everyone() {
        for board in backends(3).await {
            board.increment("Rain").await.unwrap();
            board.increment("Kent").await.unwrap();
            board.increment("Kent").await.unwrap();

            let outcome = board.increment("Kent").await.unwrap();
            assert!(outcome.winner);
            assert_eq!(outcome.record.bounce_count, 0);
            assert_eq!(outcome.record.win_count, 1);

            for record in board.get_all().await.unwrap() {
                assert_eq!(record.bounce_count, 0, "{}", record.name);
                let expected_wins = if record.name == "Kent" { 1 } else { 0 };
                assert_eq!(record.win_count, expected_wins, "{}", record.name);
            }
        }
    }

    #[tokio::test]
    async fn kent_at_998_wins_on_next_bounce() {
        let store = Arc::new(MemoryStore::new());
        let board = seed(store.clone(), DEFAULT_WIN_THRESHOLD).await;
        for _ in 0..998 {
            store.increment_bounce("Kent").await.unwrap();
        }
        store.increment_bounce("Dos").await.unwrap();

        let outcome = board.increment("Kent").await.unwrap();
        assert!(outcome.winner);
        assert_eq!((outcome.record.bounce_count, outcome.record.win_count), (0, 1));
        assert!(board.get_all().await.unwrap().iter().all(|r| r.bounce_count == 0));
    }

    #[tokio::test]
    async fn backends_agree_on_order_after_reseed() {
        let stores: Vec<Arc<dyn LeaderboardStore>> = vec![
            Arc::new(MemoryStore::new()),
            Arc::new(SqliteStore::in_memory().await.unwrap()),
        ];
        for store in stores {
            let board = seed(store.clone(), DEFAULT_WIN_THRESHOLD).await;
            store.seed(&["Eve".to_string(), "Rain".to_string()]).await.unwrap();

            let order: Vec<String> = board.get_all().await.unwrap().into_iter().map(|r| r.name).collect();
            assert_eq!(order, ["Kent", "Rain", "Dos", "Eve"]);
        }
    }

    async fn concurrent_bounces(board: Leaderboard, bounces: i64) {
        let tasks: Vec<_> = (0..bounces)
            .map(|_| {
                let board = board.clone();
                tokio::spawn(async move { board.increment("Kent").await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(board.get("Kent").await.unwrap().bounce_count, bounces);
        assert_eq!(board.get("Rain").await.unwrap().bounce_count, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_bounces_are_all_counted_in_memory() {
        let board = seed(Arc::new(MemoryStore::new()), DEFAULT_WIN_THRESHOLD).await;
        concurrent_bounces(board, 200).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_bounces_are_all_counted_in_sqlite_file() {
        let path = std::env::temp_dir().join(format!(
            "bounce-leaderboard-{}-{}.db",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let url = format!("sqlite://{}", path.display());

        let store = SqliteStore::connect(&url).await.unwrap();
        let board = seed(Arc::new(store), DEFAULT_WIN_THRESHOLD).await;
        concurrent_bounces(board, 200).await;

        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }

    #[tokio::test]
    async fn reset_zeroes_counts_and_wins() {
        for board in backends(2).await {
            board.increment("Kent").await.unwrap();
            board.increment("Kent").await.unwrap();
            board.increment("Dos").await.unwrap();

            board.reset().await.unwrap();

            for record in board.get_all().await.unwrap() {
                assert_eq!((record.bounce_count, record.win_count), (0, 0), "{}", record.name);
            }
        }
    }
}
