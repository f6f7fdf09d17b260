//! 内存事件总线

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use smsv_errors::AppResult;
use smsv_event_core::decode_event;
use smsv_ports::EventPublisher;
use tokio::sync::RwLock;

/// 已发布的消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: String,
}

/// 内存事件总线实现
#[derive(Clone, Default)]
pub struct InMemoryEventBus {
    messages: Arc<RwLock<Vec<PublishedMessage>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取所有发布的消息（用于测试）
    pub async fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.read().await.clone()
    }

    /// 解码某个主题上的全部事件
    pub async fn events<E: DeserializeOwned>(&self, topic: &str) -> AppResult<Vec<E>> {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.topic == topic)
            .map(|m| decode_event(&m.payload))
            .collect()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish_raw(&self, topic: &str, payload: &str) -> AppResult<()> {
        tracing::info!(topic = %topic, "Event published to in-memory bus");
        self.messages.write().await.push(PublishedMessage {
            topic: topic.to_string(),
            payload: payload.to_string(),
        });
        Ok(())
    }
}
