//! 短信验证事件监听器
//!
//! 把频道上的原始负载解码为领域事件并路由到对应处理器

use std::sync::Arc;

use async_trait::async_trait;
use smsv_errors::{AppError, AppResult};
use smsv_event_core::{EventHandler, EventSubscriber, decode_event};
use smsv_telemetry::names;

use crate::application::handlers::{
    SmsVerificationCodeMismatchHandler, SmsVerificationCodeVerifiedHandler,
};
use crate::config::ServiceConfig;
use crate::domain::events::{
    MISMATCH_EVENT_TYPE, SmsVerificationCodeMismatchEvent, SmsVerificationCodeVerifiedEvent,
    VERIFIED_EVENT_TYPE,
};

pub struct SmsVerificationEventListener {
    mismatch_handler: Arc<SmsVerificationCodeMismatchHandler>,
    verified_handler: Arc<SmsVerificationCodeVerifiedHandler>,
    mismatch_channel: String,
    verified_channel: String,
}

impl SmsVerificationEventListener {
    pub fn new(
        mismatch_handler: Arc<SmsVerificationCodeMismatchHandler>,
        verified_handler: Arc<SmsVerificationCodeVerifiedHandler>,
        config: &ServiceConfig,
    ) -> Self {
        Self {
            mismatch_handler,
            verified_handler,
            mismatch_channel: config.mismatch_channel.clone(),
            verified_channel: config.verified_channel.clone(),
        }
    }

    /// 频道对应的事件类型
    pub fn event_type_for_channel(&self, channel: &str) -> Option<&'static str> {
        if channel == self.mismatch_channel {
            Some(MISMATCH_EVENT_TYPE)
        } else if channel == self.verified_channel {
            Some(VERIFIED_EVENT_TYPE)
        } else {
            None
        }
    }

    /// 处理某个频道上收到的消息
    pub async fn on_message(&self, channel: &str, payload: &str) -> AppResult<()> {
        let result = match self.event_type_for_channel(channel) {
            Some(event_type) => self.handle(event_type, payload).await,
            None => Err(AppError::validation(format!(
                "Unexpected channel: {}",
                channel
            ))),
        };

        if let Err(e) = &result {
            metrics::counter!(names::HANDLER_FAILURES, "kind" => e.kind()).increment(1);
        }

        result
    }
}

#[async_trait]
impl EventSubscriber for SmsVerificationEventListener {
    fn event_types(&self) -> Vec<&'static str> {
        vec![MISMATCH_EVENT_TYPE, VERIFIED_EVENT_TYPE]
    }

    async fn handle(&self, event_type: &str, payload: &str) -> AppResult<()> {
        match event_type {
            MISMATCH_EVENT_TYPE => {
                let event: SmsVerificationCodeMismatchEvent = decode_event(payload)?;
                self.mismatch_handler.handle(&event).await
            }
            VERIFIED_EVENT_TYPE => {
                let event: SmsVerificationCodeVerifiedEvent = decode_event(payload)?;
                self.verified_handler.handle(&event).await
            }
            other => Err(AppError::validation(format!(
                "Unsupported event type: {}",
                other
            ))),
        }
    }
}
