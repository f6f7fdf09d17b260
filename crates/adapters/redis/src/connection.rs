//! Redis 连接管理

use redis::Client;
use redis::aio::ConnectionManager;
use smsv_errors::{AppError, AppResult};

/// 创建 Redis 连接管理器
pub async fn create_connection_manager(url: &str) -> AppResult<ConnectionManager> {
    let client = Client::open(url)
        .map_err(|e| AppError::internal(format!("Failed to create Redis client: {}", e)))?;

    ConnectionManager::new(client).await.map_err(|e| {
        AppError::store(format!("Failed to create Redis connection manager: {}", e))
    })
}

/// 检查 Redis 连接
pub async fn check_connection(conn: &mut ConnectionManager) -> AppResult<()> {
    redis::cmd("PING")
        .query_async::<String>(conn)
        .await
        .map_err(|e| AppError::store(format!("Redis health check failed: {}", e)))?;
    Ok(())
}

/// 将 Redis 命令错误映射为应用错误
///
/// 回复类型不符说明协议层出了问题，不可重试；其余视为存储故障
pub(crate) fn map_redis_error(operation: &str, err: redis::RedisError) -> AppError {
    if err.kind() == redis::ErrorKind::TypeError {
        AppError::internal(format!("Unexpected Redis reply for {}: {}", operation, err))
    } else {
        AppError::store(format!("Redis {} failed: {}", operation, err))
    }
}
