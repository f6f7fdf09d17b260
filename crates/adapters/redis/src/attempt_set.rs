//! 尝试集合
//!
//! 以 Redis SET 记录一组尝试，整组共享一个绝对过期时间

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use smsv_errors::AppResult;
use tracing::debug;

use crate::config::prefixed;
use crate::connection::map_redis_error;

/// Redis 尝试集合
///
/// 记录与计数通过一次 pipeline 往返完成（SADD、EXPIREAT、SCARD）。
/// pipeline 不是事务，其他客户端的命令可能穿插其间。
/// 配置了前缀时，实际存储键为 `<prefix>:<key>`。
#[derive(Clone)]
pub struct RedisAttemptSet {
    conn: ConnectionManager,
    key_prefix: Option<String>,
}

impl RedisAttemptSet {
    pub fn new(conn: ConnectionManager) -> Self {
        Self {
            conn,
            key_prefix: None,
        }
    }

    /// 设置键前缀
    pub fn with_key_prefix(mut self, prefix: Option<String>) -> Self {
        self.key_prefix = prefix;
        self
    }

    fn storage_key(&self, key: &str) -> String {
        prefixed(self.key_prefix.as_deref(), key)
    }

    /// 添加成员、把整个键的过期时间重置为 `expire_at`（Unix 秒），并返回添加后的基数
    pub async fn add_and_count(&self, key: &str, member: &str, expire_at: i64) -> AppResult<u64> {
        let key = self.storage_key(key);
        let mut conn = self.conn.clone();

        let (added, expire_applied, cardinality): (u64, bool, u64) = redis::pipe()
            .sadd(&key, member)
            .expire_at(&key, expire_at)
            .scard(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| map_redis_error("attempt pipeline", e))?;

        debug!(
            key = %key,
            added,
            expire_applied,
            cardinality,
            "Got Redis pipeline reply"
        );

        Ok(cardinality)
    }

    /// 当前基数，键不存在时为 0
    pub async fn count(&self, key: &str) -> AppResult<u64> {
        let mut conn = self.conn.clone();
        conn.scard(self.storage_key(key))
            .await
            .map_err(|e| map_redis_error("scard", e))
    }

    /// 删除整个集合，键不存在时同样成功
    pub async fn clear(&self, key: &str) -> AppResult<()> {
        let key = self.storage_key(key);
        let mut conn = self.conn.clone();
        let removed: u64 = conn
            .del(&key)
            .await
            .map_err(|e| map_redis_error("del", e))?;

        debug!(key = %key, removed, "Attempt set cleared");
        Ok(())
    }

    /// 剩余 TTL（秒），返回 None 表示键不存在或没有过期时间
    pub async fn ttl(&self, key: &str) -> AppResult<Option<i64>> {
        let mut conn = self.conn.clone();
        let ttl: i64 = conn
            .ttl(self.storage_key(key))
            .await
            .map_err(|e| map_redis_error("ttl", e))?;

        // -2 表示键不存在，-1 表示没有过期时间
        match ttl {
            -2 | -1 => Ok(None),
            t => Ok(Some(t)),
        }
    }
}
