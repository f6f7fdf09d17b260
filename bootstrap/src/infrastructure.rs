//! 基础设施资源管理

use redis::aio::ConnectionManager;
use secrecy::ExposeSecret;
use smsv_adapter_redis::{
    RedisConfig as RedisAdapterConfig, check_connection, create_connection_manager,
};
use smsv_common::{RetryConfig, with_retry};
use smsv_config::AppConfig;
use smsv_errors::{AppError, AppResult};
use tracing::info;

/// 基础设施资源容器
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// Redis 适配器配置
    redis_config: RedisAdapterConfig,
    /// Redis 连接管理器
    redis_conn: ConnectionManager,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let mut redis_config = RedisAdapterConfig::new(config.redis.url.expose_secret().clone());
        if let Some(prefix) = &config.redis.key_prefix {
            redis_config = redis_config.with_key_prefix(prefix.clone());
        }

        let retry_config = RetryConfig::new(
            redis_config.connect_max_attempts,
            redis_config.connect_initial_delay,
            redis_config.connect_max_delay,
        );
        let redis_conn = with_retry(&retry_config, "Redis connection", || {
            let url = redis_config.url.clone();
            async move {
                let mut conn = create_connection_manager(&url).await?;
                check_connection(&mut conn).await?;
                Ok::<_, AppError>(conn)
            }
        })
        .await?;
        info!("Redis connection created");

        Ok(Self {
            config,
            redis_config,
            redis_conn,
        })
    }

    /// 应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Redis 适配器配置
    pub fn redis_config(&self) -> &RedisAdapterConfig {
        &self.redis_config
    }

    /// Redis 连接管理器（克隆开销很小）
    pub fn redis_connection(&self) -> ConnectionManager {
        self.redis_conn.clone()
    }
}
