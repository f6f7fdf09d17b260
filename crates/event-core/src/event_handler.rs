//! Event Handler 定义

use async_trait::async_trait;
use smsv_errors::AppResult;

use crate::DomainEvent;

/// Event Handler trait
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    async fn handle(&self, event: &E) -> AppResult<()>;
}

/// Event Subscriber trait
///
/// 按事件类型路由原始负载
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// 订阅的事件类型
    fn event_types(&self) -> Vec<&'static str>;

    /// 处理事件
    async fn handle(&self, event_type: &str, payload: &str) -> AppResult<()>;
}
