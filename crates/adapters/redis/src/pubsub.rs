//! Redis 发布/订阅模块

use std::future::Future;

use async_trait::async_trait;
use futures::{Stream, StreamExt, future};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use smsv_errors::{AppError, AppResult};
use smsv_ports::EventPublisher;
use tracing::{debug, error, info};

use crate::config::{RedisConfig, prefixed, unprefixed};

/// 收到的消息
#[derive(Debug, Clone)]
pub struct PubSubMessage {
    /// 频道（已去除前缀）
    pub channel: String,
    /// 消息内容
    pub payload: String,
}

impl PubSubMessage {
    pub fn new(channel: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            payload: payload.into(),
        }
    }
}

/// Redis 发布者
#[derive(Clone)]
pub struct RedisPublisher {
    conn: ConnectionManager,
    key_prefix: Option<String>,
}

impl RedisPublisher {
    /// 从连接管理器创建
    pub fn from_connection(conn: ConnectionManager) -> Self {
        Self {
            conn,
            key_prefix: None,
        }
    }

    /// 设置频道前缀
    pub fn with_key_prefix(mut self, prefix: Option<String>) -> Self {
        self.key_prefix = prefix;
        self
    }

    /// 发布消息，返回收到消息的订阅者数量
    pub async fn publish_message(&self, channel: &str, message: &str) -> AppResult<u64> {
        let channel = prefixed(self.key_prefix.as_deref(), channel);
        let mut conn = self.conn.clone();
        let subscribers: u64 = conn
            .publish(&channel, message)
            .await
            .map_err(|e| AppError::external_service(format!("Failed to publish message: {}", e)))?;

        debug!(channel = %channel, subscribers, "Message published");
        Ok(subscribers)
    }
}

#[async_trait]
impl EventPublisher for RedisPublisher {
    async fn publish_raw(&self, topic: &str, payload: &str) -> AppResult<()> {
        self.publish_message(topic, payload).await.map(|_| ())
    }
}

/// Redis 订阅者
pub struct RedisSubscriber {
    client: Client,
    key_prefix: Option<String>,
}

impl RedisSubscriber {
    /// 创建新的订阅者
    pub fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| AppError::internal(format!("Failed to create Redis client: {}", e)))?;

        Ok(Self {
            client,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// 订阅频道并逐条处理消息
    ///
    /// 只在出错时返回：订阅失败，或连接断开导致消息流结束
    pub async fn subscribe<F, Fut>(&self, channels: &[String], handler: F) -> AppResult<()>
    where
        F: FnMut(PubSubMessage) -> Fut + Send,
        Fut: Future<Output = AppResult<()>> + Send,
    {
        let prefixed_channels: Vec<String> = channels
            .iter()
            .map(|c| prefixed(self.key_prefix.as_deref(), c))
            .collect();

        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| AppError::store(format!("Failed to get pubsub connection: {}", e)))?;

        for channel in &prefixed_channels {
            pubsub.subscribe(channel).await.map_err(|e| {
                AppError::store(format!("Failed to subscribe to {}: {}", channel, e))
            })?;
        }

        info!(channels = ?prefixed_channels, "Subscribed to channels");

        let prefix = self.key_prefix.clone();
        let messages = pubsub.on_message().filter_map(move |msg| {
            let channel = unprefixed(prefix.as_deref(), msg.get_channel_name()).to_string();
            let message = match msg.get_payload::<String>() {
                Ok(payload) => Some(PubSubMessage::new(channel, payload)),
                Err(e) => {
                    error!(channel = %channel, error = %e, "Failed to get message payload");
                    None
                }
            };
            future::ready(message)
        });

        dispatch_messages(messages, handler).await
    }
}

/// 把消息流逐条交给处理函数
///
/// 单条消息处理失败只记录日志，不中断分发。
/// 消息流结束说明订阅连接已断开，返回可重试的存储错误，由进程管理器重启 worker
pub async fn dispatch_messages<S, F, Fut>(messages: S, mut handler: F) -> AppResult<()>
where
    S: Stream<Item = PubSubMessage>,
    F: FnMut(PubSubMessage) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    futures::pin_mut!(messages);

    while let Some(message) = messages.next().await {
        let channel = message.channel.clone();
        if let Err(e) = handler(message).await {
            error!(
                channel = %channel,
                error = %e,
                retryable = e.is_retryable(),
                "Failed to handle message"
            );
        }
    }

    error!("Pubsub stream closed");
    Err(AppError::store("Pubsub stream closed"))
}
