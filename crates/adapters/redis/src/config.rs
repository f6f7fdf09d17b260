//! Redis 配置模块

use std::time::Duration;

/// Redis 配置
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL
    pub url: String,
    /// 键与频道前缀，共用同一 Redis 的多个部署以此隔离
    pub key_prefix: Option<String>,
    /// 启动时最大连接尝试次数
    pub connect_max_attempts: u32,
    /// 初始重试延迟
    pub connect_initial_delay: Duration,
    /// 最大重试延迟
    pub connect_max_delay: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: None,
            connect_max_attempts: 5,
            connect_initial_delay: Duration::from_secs(1),
            connect_max_delay: Duration::from_secs(30),
        }
    }
}

impl RedisConfig {
    /// 创建新的配置
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 设置键前缀
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

pub(crate) fn prefixed(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, key),
        None => key.to_string(),
    }
}

pub(crate) fn unprefixed<'a>(prefix: Option<&str>, key: &'a str) -> &'a str {
    match prefix {
        Some(prefix) => key
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(key),
        None => key,
    }
}
