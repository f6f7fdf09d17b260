//! Event Publisher trait 定义

use async_trait::async_trait;
use serde::Serialize;
use smsv_errors::{AppError, AppResult};

/// 事件发布者 trait
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// 发布原始 JSON 字符串
    async fn publish_raw(&self, topic: &str, payload: &str) -> AppResult<()>;
}

/// 事件发布扩展：负责序列化
#[async_trait]
pub trait EventPublisherExt: EventPublisher {
    /// 发布事件
    async fn publish<E: Serialize + Send + Sync>(&self, topic: &str, event: &E) -> AppResult<()> {
        let payload = serde_json::to_string(event)
            .map_err(|e| AppError::serialization(format!("Failed to serialize event: {}", e)))?;
        self.publish_raw(topic, &payload).await
    }
}

impl<T: EventPublisher + ?Sized> EventPublisherExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl EventPublisher for Recording {
        async fn publish_raw(&self, topic: &str, payload: &str) -> AppResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((topic.to_string(), payload.to_string()));
            Ok(())
        }
    }

    #[derive(Serialize)]
    struct Ping {
        n: u32,
    }

    #[tokio::test]
    async fn test_publish_serializes_to_json() {
        let publisher = Recording::default();
        publisher.publish("pings", &Ping { n: 1 }).await.unwrap();

        let sent = publisher.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), &[("pings".to_string(), r#"{"n":1}"#.to_string())]);
    }

    #[tokio::test]
    async fn test_publish_through_trait_object() {
        let publisher: Box<dyn EventPublisher> = Box::new(Recording::default());
        publisher.publish("pings", &Ping { n: 2 }).await.unwrap();
    }
}
