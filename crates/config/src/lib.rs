//! smsv-config - 配置加载库

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Redis 配置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: Secret<String>,
    /// 频道名前缀（可选）
    #[serde(default)]
    pub key_prefix: Option<String>,
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Prometheus 抓取地址，例如 `0.0.0.0:9100`；未配置则不启动导出器
    #[serde(default)]
    pub metrics_addr: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            metrics_addr: None,
        }
    }
}

/// 短信验证码防爆破配置
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    /// 触发锁定的验证码不匹配次数
    #[serde(default = "default_mismatch_threshold")]
    pub mismatch_threshold: u64,
    /// 验证码不匹配事件频道
    #[serde(default = "default_mismatch_channel")]
    pub mismatch_channel: String,
    /// 验证成功事件频道
    #[serde(default = "default_verified_channel")]
    pub verified_channel: String,
    /// 失败次数过多事件频道
    #[serde(default = "default_lockout_channel")]
    pub lockout_channel: String,
}

pub const DEFAULT_MISMATCH_THRESHOLD: u64 = 5;

fn default_mismatch_threshold() -> u64 {
    DEFAULT_MISMATCH_THRESHOLD
}

fn default_mismatch_channel() -> String {
    "sms.verification.code.mismatch".to_string()
}

fn default_verified_channel() -> String {
    "sms.verification.code.verified".to_string()
}

fn default_lockout_channel() -> String {
    "sms.verification.too-many-failures".to_string()
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            mismatch_threshold: default_mismatch_threshold(),
            mismatch_channel: default_mismatch_channel(),
            verified_channel: default_verified_channel(),
            lockout_channel: default_lockout_channel(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub redis: RedisConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 优先级：`SMSV_` 前缀环境变量 > `{APP_ENV}.toml` > `default.toml`，
    /// 嵌套字段用双下划线分隔，例如 `SMSV_REDIS__URL`
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config: Self = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("SMSV_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verification.mismatch_threshold == 0 {
            return Err(ConfigError::Invalid(
                "verification.mismatch_threshold must be at least 1".to_string(),
            ));
        }
        if self.verification.mismatch_channel == self.verification.verified_channel {
            return Err(ConfigError::Invalid(
                "mismatch and verified channels must differ".to_string(),
            ));
        }
        // 锁定事件不能回流到本服务订阅的频道
        let lockout = &self.verification.lockout_channel;
        if lockout == &self.verification.mismatch_channel
            || lockout == &self.verification.verified_channel
        {
            return Err(ConfigError::Invalid(format!(
                "verification.lockout_channel {} must differ from the inbound channels",
                lockout
            )));
        }
        Ok(())
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

#[cfg(test)]
mod tests;
