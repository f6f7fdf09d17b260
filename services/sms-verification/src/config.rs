//! 服务配置

use smsv_config::{AppConfig, VerificationConfig};

pub use smsv_config::DEFAULT_MISMATCH_THRESHOLD;

/// 默认锁定事件主题
pub const DEFAULT_LOCKOUT_TOPIC: &str = "sms.verification.too-many-failures";

/// 服务配置
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// 锁定阈值
    pub mismatch_threshold: u64,
    /// 不匹配事件频道
    pub mismatch_channel: String,
    /// 验证成功事件频道
    pub verified_channel: String,
    /// 锁定事件频道
    pub lockout_channel: String,
}

impl ServiceConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::from(&config.verification)
    }

    /// 需要订阅的频道
    pub fn inbound_channels(&self) -> Vec<String> {
        vec![self.mismatch_channel.clone(), self.verified_channel.clone()]
    }
}

impl From<&VerificationConfig> for ServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            mismatch_threshold: config.mismatch_threshold,
            mismatch_channel: config.mismatch_channel.clone(),
            verified_channel: config.verified_channel.clone(),
            lockout_channel: config.lockout_channel.clone(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&VerificationConfig::default())
    }
}
