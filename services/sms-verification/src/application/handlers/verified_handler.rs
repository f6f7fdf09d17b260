//! 验证成功处理器

use std::sync::Arc;

use async_trait::async_trait;
use smsv_errors::AppResult;
use smsv_event_core::EventHandler;
use smsv_telemetry::names;
use tracing::debug;

use crate::domain::events::SmsVerificationCodeVerifiedEvent;
use crate::domain::repositories::MismatchAttemptStore;
use crate::domain::services::mismatch_attempts_key;

/// 验证成功处理器
///
/// 无条件清除该主体的全部不匹配记录
pub struct SmsVerificationCodeVerifiedHandler {
    store: Arc<dyn MismatchAttemptStore>,
}

impl SmsVerificationCodeVerifiedHandler {
    pub fn new(store: Arc<dyn MismatchAttemptStore>) -> Self {
        Self { store }
    }

    pub async fn on_verified(&self, event: &SmsVerificationCodeVerifiedEvent) -> AppResult<()> {
        let key = mismatch_attempts_key(&event.mobile, &event.scope);
        self.store.clear(&key).await?;

        metrics::counter!(names::ATTEMPTS_CLEARED).increment(1);
        debug!(
            mobile = %event.mobile.masked(),
            scope = %event.scope,
            "Mismatch attempts cleared after verification"
        );

        Ok(())
    }
}

#[async_trait]
impl EventHandler<SmsVerificationCodeVerifiedEvent> for SmsVerificationCodeVerifiedHandler {
    async fn handle(&self, event: &SmsVerificationCodeVerifiedEvent) -> AppResult<()> {
        self.on_verified(event).await
    }
}
