//! 不匹配尝试存储接口

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use smsv_errors::AppResult;

/// 不匹配尝试存储
///
/// 每个主体一个集合，集合的过期时间随最新一条记录重置。
/// 存储故障以可重试错误返回，调用方不得吞掉。
#[async_trait]
pub trait MismatchAttemptStore: Send + Sync {
    /// 记录一条不匹配，把集合过期时间设为 `expires_at`，返回包含本条在内的集合基数
    ///
    /// 三步在一次往返内完成
    async fn record_and_count(
        &self,
        key: &str,
        record: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// 当前记录数，集合不存在时为 0
    async fn count(&self, key: &str) -> AppResult<u64>;

    /// 删除集合，集合不存在时同样成功
    async fn clear(&self, key: &str) -> AppResult<()>;
}
