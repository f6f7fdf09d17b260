//! telemetry - 可观测性库

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid metrics address {0}: {1}")]
    InvalidAddress(String, std::net::AddrParseError),

    #[error("Failed to install Prometheus exporter: {0}")]
    Exporter(#[from] metrics_exporter_prometheus::BuildError),
}

/// 初始化 tracing
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// 初始化 Prometheus metrics，并在指定地址暴露抓取端点
///
/// 需要在 tokio 运行时内调用
pub fn init_metrics(addr: &str) -> Result<(), TelemetryError> {
    let socket: SocketAddr = addr
        .parse()
        .map_err(|e| TelemetryError::InvalidAddress(addr.to_string(), e))?;

    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(socket)
        .install()?;

    tracing::info!(%socket, "Prometheus exporter listening");
    Ok(())
}

/// 指标名称
pub mod names {
    /// 已记录的验证码不匹配次数
    pub const MISMATCHES_RECORDED: &str = "sms_verification_mismatches_total";
    /// 已触发的锁定次数
    pub const LOCKOUTS_TRIGGERED: &str = "sms_verification_lockouts_total";
    /// 已清除的尝试集合次数（验证成功）
    pub const ATTEMPTS_CLEARED: &str = "sms_verification_attempts_cleared_total";
    /// 事件处理失败次数
    pub const HANDLER_FAILURES: &str = "sms_verification_handler_failures_total";
}
