//! Domain Event 定义

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use smsv_common::EventId;
use smsv_errors::{AppError, AppResult};

/// Domain Event trait
pub trait DomainEvent: Send + Sync + Serialize {
    /// 事件类型名称
    fn event_type(&self) -> &'static str;

    /// 聚合类型
    fn aggregate_type(&self) -> &'static str;

    /// 聚合 ID
    fn aggregate_id(&self) -> String;

    /// 事件 ID
    fn event_id(&self) -> &EventId;

    /// 发生时间
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// 从 JSON 负载反序列化事件
///
/// 负载格式错误属于不可重试的拒绝
pub fn decode_event<E: DeserializeOwned>(payload: &str) -> AppResult<E> {
    serde_json::from_str(payload)
        .map_err(|e| AppError::validation(format!("Failed to deserialize event: {}", e)))
}
