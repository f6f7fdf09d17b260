//! 验证码不匹配处理器

use std::sync::Arc;

use async_trait::async_trait;
use smsv_common::{Clock, EventId};
use smsv_errors::AppResult;
use smsv_event_core::EventHandler;
use smsv_ports::{EventPublisher, EventPublisherExt};
use smsv_telemetry::names;
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_LOCKOUT_TOPIC, DEFAULT_MISMATCH_THRESHOLD};
use crate::domain::events::{
    SmsVerificationCodeMismatchEvent, TooManyFailureSmsVerificationAttemptsEvent,
};
use crate::domain::repositories::MismatchAttemptStore;
use crate::domain::services::mismatch_attempts_key;

/// 一次不匹配处理的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchOutcome {
    /// 未达阈值，继续追踪
    Tracking { attempts: u64 },
    /// 达到阈值，集合已清除并发布了锁定事件
    LockedOut {
        attempts: u64,
        event: TooManyFailureSmsVerificationAttemptsEvent,
    },
}

impl MismatchOutcome {
    pub fn is_locked_out(&self) -> bool {
        matches!(self, Self::LockedOut { .. })
    }

    pub fn attempts(&self) -> u64 {
        match self {
            Self::Tracking { attempts } | Self::LockedOut { attempts, .. } => *attempts,
        }
    }
}

/// 验证码不匹配处理器
///
/// 进程内无状态，所有状态都在共享存储中，可以任意水平扩展。
/// 同一主体的并发不匹配可能都观察到达到阈值的计数，此时会重复发布锁定事件。
pub struct SmsVerificationCodeMismatchHandler {
    store: Arc<dyn MismatchAttemptStore>,
    publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    threshold: u64,
    lockout_topic: String,
}

impl SmsVerificationCodeMismatchHandler {
    pub fn new(
        store: Arc<dyn MismatchAttemptStore>,
        publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            publisher,
            clock,
            threshold: DEFAULT_MISMATCH_THRESHOLD,
            lockout_topic: DEFAULT_LOCKOUT_TOPIC.to_string(),
        }
    }

    /// 设置锁定阈值（至少为 1）
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold.max(1);
        self
    }

    /// 设置锁定事件的发布主题
    pub fn with_lockout_topic(mut self, topic: impl Into<String>) -> Self {
        self.lockout_topic = topic.into();
        self
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// 处理一次不匹配
    ///
    /// 存储失败时不发布任何事件；发布失败时集合已被清除，不做补偿
    pub async fn on_mismatch(
        &self,
        event: &SmsVerificationCodeMismatchEvent,
    ) -> AppResult<MismatchOutcome> {
        debug!(
            event_id = %event.id,
            mobile = %event.mobile.masked(),
            scope = %event.scope,
            expires_at = %event.expires_at,
            "Receiving verification code mismatch"
        );

        let key = mismatch_attempts_key(&event.mobile, &event.scope);
        let record = event.to_record()?;
        let attempts = self
            .store
            .record_and_count(&key, &record, event.expires_at)
            .await?;

        metrics::counter!(names::MISMATCHES_RECORDED).increment(1);
        debug!(key = %key, attempts, threshold = self.threshold, "Mismatch recorded");

        if attempts < self.threshold {
            return Ok(MismatchOutcome::Tracking { attempts });
        }

        info!(
            mobile = %event.mobile.masked(),
            scope = %event.scope,
            attempts,
            "Too many failure attempts"
        );

        self.store.clear(&key).await?;

        let lockout = TooManyFailureSmsVerificationAttemptsEvent::new(
            EventId::new(),
            self.clock.now(),
            event.mobile.clone(),
            event.scope.clone(),
        );

        if let Err(e) = self.publisher.publish(&self.lockout_topic, &lockout).await {
            warn!(
                lockout_id = %lockout.id,
                error = %e,
                "Attempts cleared but lockout event was not published"
            );
            return Err(e);
        }

        metrics::counter!(names::LOCKOUTS_TRIGGERED).increment(1);

        Ok(MismatchOutcome::LockedOut {
            attempts,
            event: lockout,
        })
    }
}

#[async_trait]
impl EventHandler<SmsVerificationCodeMismatchEvent> for SmsVerificationCodeMismatchHandler {
    async fn handle(&self, event: &SmsVerificationCodeMismatchEvent) -> AppResult<()> {
        self.on_mismatch(event).await.map(|_| ())
    }
}
