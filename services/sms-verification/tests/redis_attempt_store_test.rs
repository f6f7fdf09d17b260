//! Redis 尝试存储集成测试
//!
//! 需要运行中的 Redis：`REDIS_URL=redis://localhost:6379 cargo test -- --ignored`

use std::sync::Arc;

use chrono::{Duration, Utc};
use sms_verification::application::handlers::SmsVerificationCodeMismatchHandler;
use sms_verification::domain::events::SmsVerificationCodeMismatchEvent;
use sms_verification::domain::repositories::MismatchAttemptStore;
use sms_verification::domain::value_objects::{MobilePhoneNumber, SmsVerificationScope};
use sms_verification::infrastructure::cache::RedisMismatchAttemptStore;
use sms_verification::infrastructure::events::InMemoryEventBus;
use smsv_adapter_redis::{RedisAttemptSet, create_connection_manager};
use smsv_common::SystemClock;

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

async fn store() -> RedisMismatchAttemptStore {
    let conn = create_connection_manager(&redis_url()).await.unwrap();
    RedisMismatchAttemptStore::new(RedisAttemptSet::new(conn))
}

fn unique_key(name: &str) -> String {
    format!("test.sms.verification.{}.{}", name, uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore]
async fn test_record_and_count_sets_absolute_expiry() {
    let store = store().await;
    let key = unique_key("expiry");

    let first = Utc::now() + Duration::minutes(10);
    assert_eq!(store.record_and_count(&key, "a", first).await.unwrap(), 1);

    let second = Utc::now() + Duration::minutes(2);
    assert_eq!(store.record_and_count(&key, "b", second).await.unwrap(), 2);

    let ttl = store.ttl(&key).await.unwrap().unwrap();
    assert!(ttl <= 120 && ttl > 100, "ttl = {}", ttl);

    store.clear(&key).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_duplicate_member_and_idempotent_clear() {
    let store = store().await;
    let key = unique_key("dup");
    let exp = Utc::now() + Duration::minutes(5);

    store.record_and_count(&key, "a", exp).await.unwrap();
    assert_eq!(store.record_and_count(&key, "a", exp).await.unwrap(), 1);

    store.clear(&key).await.unwrap();
    store.clear(&key).await.unwrap();
    assert_eq!(store.count(&key).await.unwrap(), 0);
    assert_eq!(store.ttl(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore]
async fn test_lockout_against_redis() {
    let store = Arc::new(store().await);
    let bus = InMemoryEventBus::new();
    let handler = SmsVerificationCodeMismatchHandler::new(
        store,
        Arc::new(bus.clone()),
        Arc::new(SystemClock),
    )
    .with_threshold(5);

    // 每次运行使用不同的 scope，避免与残留数据冲突
    let scope = format!("TEST_{}", uuid::Uuid::new_v4().simple());
    let mobile = MobilePhoneNumber::new("+8613800138000").unwrap();
    let scope = SmsVerificationScope::new(scope).unwrap();

    for attempt in 1..=5u64 {
        let event = SmsVerificationCodeMismatchEvent::new(
            Utc::now(),
            mobile.clone(),
            scope.clone(),
            Utc::now() + Duration::minutes(5),
        );
        let outcome = handler.on_mismatch(&event).await.unwrap();
        assert_eq!(outcome.attempts(), attempt);
        assert_eq!(outcome.is_locked_out(), attempt == 5);
    }

    assert_eq!(bus.messages().await.len(), 1);
}
