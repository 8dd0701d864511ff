use async_trait::async_trait;
use tokio::sync::RwLock;

use super::LeaderboardStore;
use crate::error::StoreError;
use crate::models::ColleagueRecord;

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ColleagueRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, name: &str, apply: F) -> Option<ColleagueRecord>
    where
        F: FnOnce(&mut ColleagueRecord),
    {
        let mut records = self.records.write().await;
        let record = records.iter_mut().find(|r| r.name == name)?;
        apply(record);
        Some(record.clone())
    }
}

#[async_trait]
impl LeaderboardStore for MemoryStore {
    async fn seed(&self, names: &[String]) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        for name in names {
            if !records.iter().any(|r| &r.name == name) {
                records.push(ColleagueRecord::new(name.clone()));
            }
        }
        Ok(())
    }

    async fn all(&self) -> Result<Vec<ColleagueRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, name: &str) -> Result<Option<ColleagueRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.name == name).cloned())
    }

    async fn increment_bounce(&self, name: &str) -> Result<Option<ColleagueRecord>, StoreError> {
        Ok(self.update(name, |r| r.bounce_count += 1).await)
    }

    async fn award_win(&self, name: &str) -> Result<Option<ColleagueRecord>, StoreError> {
        Ok(self
            .update(name, |r| {
                r.win_count += 1;
                r.bounce_count = 0;
            })
            .await)
    }

    async fn clear_bounces(&self) -> Result<(), StoreError> {
        for record in self.records.write().await.iter_mut() {
            record.bounce_count = 0;
        }
        Ok(())
    }

    async fn reset_all(&self) -> Result<(), StoreError> {
        for record in self.records.write().await.iter_mut() {
            record.bounce_count = 0;
            record.win_count = 0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn seed_keeps_order_and_ignores_duplicates() {
        let store = MemoryStore::new();
        store.seed(&names(&["Kent", "Rain", "Kent"])).await.unwrap();
        store.increment_bounce("Rain").await.unwrap();
        store.seed(&names(&["Rain", "Dos"])).await.unwrap();

        let all = store.all().await.unwrap();
        let order: Vec<&str> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, ["Kent", "Rain", "Dos"]);
        assert_eq!(all[1].bounce_count, 1);
    }

    #[tokio::test]
    async fn unknown_name_is_none() {
        let store = MemoryStore::new();
        store.seed(&names(&["Kent"])).await.unwrap();

        assert!(store.increment_bounce("Nobody").await.unwrap().is_none());
        assert!(store.award_win("Nobody").await.unwrap().is_none());
        assert_eq!(store.get("Kent").await.unwrap(), Some(ColleagueRecord::new("Kent")));
    }

    #[tokio::test]
    async fn award_win_clears_only_that_record() {
        let store = MemoryStore::new();
        store.seed(&names(&["Kent", "Rain"])).await.unwrap();
        store.increment_bounce("Kent").await.unwrap();
        store.increment_bounce("Rain").await.unwrap();

        let kent = store.award_win("Kent").await.unwrap().unwrap();
        assert_eq!((kent.bounce_count, kent.win_count), (0, 1));
        assert_eq!(store.get("Rain").await.unwrap().unwrap().bounce_count, 1);

        store.clear_bounces().await.unwrap();
        assert_eq!(store.get("Rain").await.unwrap().unwrap().bounce_count, 0);
        assert_eq!(store.get("Kent").await.unwrap().unwrap().win_count, 1);
    }
}
