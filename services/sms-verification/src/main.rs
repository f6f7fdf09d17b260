//! sms-verification worker
//!
//! 订阅验证码不匹配 / 验证成功频道，达到阈值时发布失败次数过多事件

use std::sync::Arc;

use sms_verification::application::handlers::{
    SmsVerificationCodeMismatchHandler, SmsVerificationCodeVerifiedHandler,
};
use sms_verification::application::listeners::SmsVerificationEventListener;
use sms_verification::config::ServiceConfig;
use sms_verification::infrastructure::cache::RedisMismatchAttemptStore;
use smsv_adapter_redis::{RedisAttemptSet, RedisPublisher, RedisSubscriber};
use smsv_bootstrap::{Infrastructure, run_worker};
use smsv_common::SystemClock;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 本地开发时从 .env 读取 SMSV_ 前缀变量
    dotenvy::dotenv().ok();

    run_worker("config", |infra: Infrastructure| async move {
        info!("Initializing sms-verification worker...");

        let service_config = ServiceConfig::from_app_config(infra.config());

        let key_prefix = infra.redis_config().key_prefix.clone();
        let store = Arc::new(RedisMismatchAttemptStore::new(
            RedisAttemptSet::new(infra.redis_connection()).with_key_prefix(key_prefix.clone()),
        ));
        let publisher = Arc::new(
            RedisPublisher::from_connection(infra.redis_connection())
                .with_key_prefix(key_prefix),
        );

        let mismatch_handler = Arc::new(
            SmsVerificationCodeMismatchHandler::new(store.clone(), publisher, Arc::new(SystemClock))
                .with_threshold(service_config.mismatch_threshold)
                .with_lockout_topic(service_config.lockout_channel.clone()),
        );
        let verified_handler = Arc::new(SmsVerificationCodeVerifiedHandler::new(store));
        let listener = Arc::new(SmsVerificationEventListener::new(
            mismatch_handler,
            verified_handler,
            &service_config,
        ));

        info!(
            threshold = service_config.mismatch_threshold,
            lockout_channel = %service_config.lockout_channel,
            "Handlers initialized"
        );

        let subscriber = RedisSubscriber::new(infra.redis_config())?;
        subscriber
            .subscribe(&service_config.inbound_channels(), move |message| {
                let listener = listener.clone();
                async move { listener.on_message(&message.channel, &message.payload).await }
            })
            .await
    })
    .await
}
