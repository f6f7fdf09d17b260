//! Redis 不匹配尝试存储实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use smsv_adapter_redis::RedisAttemptSet;
use smsv_errors::AppResult;

use crate::domain::repositories::MismatchAttemptStore;

/// Redis 不匹配尝试存储
pub struct RedisMismatchAttemptStore {
    attempts: RedisAttemptSet,
}

impl RedisMismatchAttemptStore {
    pub fn new(attempts: RedisAttemptSet) -> Self {
        Self { attempts }
    }

    /// 剩余有效时间（秒）
    pub async fn ttl(&self, key: &str) -> AppResult<Option<i64>> {
        self.attempts.ttl(key).await
    }
}

#[async_trait]
impl MismatchAttemptStore for RedisMismatchAttemptStore {
    async fn record_and_count(
        &self,
        key: &str,
        record: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        // SADD + EXPIREAT + SCARD 一次 pipeline
        self.attempts
            .add_and_count(key, record, expires_at.timestamp())
            .await
    }

    async fn count(&self, key: &str) -> AppResult<u64> {
        self.attempts.count(key).await
    }

    async fn clear(&self, key: &str) -> AppResult<()> {
        self.attempts.clear(key).await
    }
}
