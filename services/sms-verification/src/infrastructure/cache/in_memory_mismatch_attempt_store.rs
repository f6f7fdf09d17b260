//! 内存不匹配尝试存储（测试与本地运行）

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use smsv_common::Clock;
use smsv_errors::AppResult;

use crate::domain::repositories::MismatchAttemptStore;

#[derive(Debug, Default)]
struct AttemptSet {
    records: BTreeSet<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// 内存不匹配尝试存储
///
/// 与 Redis 语义一致：过期按秒截断，过期时间不晚于当前时刻的集合视为不存在
pub struct InMemoryMismatchAttemptStore {
    sets: Mutex<HashMap<String, AttemptSet>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryMismatchAttemptStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            sets: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// 集合的过期时间
    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let mut sets = self.sets.lock();
        self.evict_if_expired(&mut sets, key);
        sets.get(key).and_then(|set| set.expires_at)
    }

    /// 集合中的全部记录
    pub fn records(&self, key: &str) -> Vec<String> {
        let mut sets = self.sets.lock();
        self.evict_if_expired(&mut sets, key);
        sets.get(key)
            .map(|set| set.records.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// 当前存在的键数量
    pub fn len(&self) -> usize {
        let now = self.clock.now().timestamp();
        self.sets
            .lock()
            .values()
            .filter(|set| set.expires_at.is_none_or(|at| at.timestamp() > now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict_if_expired(&self, sets: &mut HashMap<String, AttemptSet>, key: &str) {
        let now = self.clock.now().timestamp();
        let expired = sets
            .get(key)
            .and_then(|set| set.expires_at)
            .is_some_and(|at| at.timestamp() <= now);
        if expired {
            sets.remove(key);
        }
    }
}

#[async_trait]
impl MismatchAttemptStore for InMemoryMismatchAttemptStore {
    async fn record_and_count(
        &self,
        key: &str,
        record: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut sets = self.sets.lock();
        self.evict_if_expired(&mut sets, key);

        let set = sets.entry(key.to_string()).or_default();
        set.records.insert(record.to_string());
        set.expires_at = Some(expires_at);

        // 过期时间已过时，EXPIREAT 会立即删除该键
        self.evict_if_expired(&mut sets, key);
        Ok(sets.get(key).map_or(0, |set| set.records.len() as u64))
    }

    async fn count(&self, key: &str) -> AppResult<u64> {
        let mut sets = self.sets.lock();
        self.evict_if_expired(&mut sets, key);
        Ok(sets.get(key).map_or(0, |set| set.records.len() as u64))
    }

    async fn clear(&self, key: &str) -> AppResult<()> {
        self.sets.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use smsv_common::FixedClock;

    fn setup() -> (InMemoryMismatchAttemptStore, FixedClock, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let clock = FixedClock::new(now);
        let store = InMemoryMismatchAttemptStore::new(Arc::new(clock.clone()));
        (store, clock, now)
    }

    #[tokio::test]
    async fn test_record_and_count_includes_new_record() {
        let (store, _, now) = setup();
        let exp = now + Duration::minutes(5);

        assert_eq!(store.record_and_count("k", "a", exp).await.unwrap(), 1);
        assert_eq!(store.record_and_count("k", "b", exp).await.unwrap(), 2);
        assert_eq!(store.count("k").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_identical_records_are_counted_once() {
        let (store, _, now) = setup();
        let exp = now + Duration::minutes(5);

        store.record_and_count("k", "a", exp).await.unwrap();
        assert_eq!(store.record_and_count("k", "a", exp).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_expiry_follows_latest_record() {
        let (store, _, now) = setup();

        store.record_and_count("k", "a", now + Duration::minutes(10)).await.unwrap();
        store.record_and_count("k", "b", now + Duration::minutes(2)).await.unwrap();

        assert_eq!(store.expires_at("k"), Some(now + Duration::minutes(2)));
    }

    #[tokio::test]
    async fn test_set_disappears_after_expiry() {
        let (store, clock, now) = setup();

        store.record_and_count("k", "a", now + Duration::minutes(5)).await.unwrap();
        clock.advance(Duration::minutes(5));

        assert_eq!(store.count("k").await.unwrap(), 0);
        assert!(store.records("k").is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_past_expiry_deletes_immediately() {
        let (store, _, now) = setup();

        let count = store
            .record_and_count("k", "a", now - Duration::seconds(1))
            .await
            .unwrap();

        assert_eq!(count, 0);
        assert_eq!(store.expires_at("k"), None);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let (store, _, now) = setup();

        store.clear("k").await.unwrap();
        store.record_and_count("k", "a", now + Duration::minutes(5)).await.unwrap();
        store.clear("k").await.unwrap();
        store.clear("k").await.unwrap();

        assert_eq!(store.count("k").await.unwrap(), 0);
    }
}
