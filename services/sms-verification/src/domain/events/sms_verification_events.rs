//! 短信验证码领域事件

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smsv_common::EventId;
use smsv_errors::AppResult;
use smsv_event_core::DomainEvent;

use crate::domain::value_objects::{MobilePhoneNumber, SmsVerificationScope};

const AGGREGATE_TYPE: &str = "SmsVerification";

pub const MISMATCH_EVENT_TYPE: &str = "SmsVerificationCodeMismatch";
pub const VERIFIED_EVENT_TYPE: &str = "SmsVerificationCodeVerified";
pub const TOO_MANY_FAILURES_EVENT_TYPE: &str = "TooManyFailureSmsVerificationAttempts";

fn aggregate_id(mobile: &MobilePhoneNumber, scope: &SmsVerificationScope) -> String {
    format!("{}.{}", mobile, scope)
}

/// 验证码不匹配
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsVerificationCodeMismatchEvent {
    pub id: EventId,
    pub when: DateTime<Utc>,
    pub mobile: MobilePhoneNumber,
    pub scope: SmsVerificationScope,
    /// 被校验的验证码的过期时间
    pub expires_at: DateTime<Utc>,
}

impl SmsVerificationCodeMismatchEvent {
    pub fn new(
        when: DateTime<Utc>,
        mobile: MobilePhoneNumber,
        scope: SmsVerificationScope,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId::new(),
            when,
            mobile,
            scope,
            expires_at,
        }
    }

    /// 作为尝试集合成员的记录
    ///
    /// 字段顺序固定，两条记录仅在所有字段都相同时才相等
    pub fn to_record(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl DomainEvent for SmsVerificationCodeMismatchEvent {
    fn event_type(&self) -> &'static str {
        MISMATCH_EVENT_TYPE
    }

    fn aggregate_type(&self) -> &'static str {
        AGGREGATE_TYPE
    }

    fn aggregate_id(&self) -> String {
        aggregate_id(&self.mobile, &self.scope)
    }

    fn event_id(&self) -> &EventId {
        &self.id
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.when
    }
}

/// 验证码已验证
///
/// 上游可能只发送主体，缺省的 `id` 和 `when` 在接收时补齐
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsVerificationCodeVerifiedEvent {
    #[serde(default)]
    pub id: EventId,
    #[serde(default = "Utc::now")]
    pub when: DateTime<Utc>,
    pub mobile: MobilePhoneNumber,
    pub scope: SmsVerificationScope,
}

impl SmsVerificationCodeVerifiedEvent {
    pub fn new(when: DateTime<Utc>, mobile: MobilePhoneNumber, scope: SmsVerificationScope) -> Self {
        Self {
            id: EventId::new(),
            when,
            mobile,
            scope,
        }
    }
}

impl DomainEvent for SmsVerificationCodeVerifiedEvent {
    fn event_type(&self) -> &'static str {
        VERIFIED_EVENT_TYPE
    }

    fn aggregate_type(&self) -> &'static str {
        AGGREGATE_TYPE
    }

    fn aggregate_id(&self) -> String {
        aggregate_id(&self.mobile, &self.scope)
    }

    fn event_id(&self) -> &EventId {
        &self.id
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.when
    }
}

/// 验证失败次数过多
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooManyFailureSmsVerificationAttemptsEvent {
    pub id: EventId,
    pub when: DateTime<Utc>,
    pub mobile: MobilePhoneNumber,
    pub scope: SmsVerificationScope,
}

impl TooManyFailureSmsVerificationAttemptsEvent {
    pub fn new(
        id: EventId,
        when: DateTime<Utc>,
        mobile: MobilePhoneNumber,
        scope: SmsVerificationScope,
    ) -> Self {
        Self {
            id,
            when,
            mobile,
            scope,
        }
    }
}

impl DomainEvent for TooManyFailureSmsVerificationAttemptsEvent {
    fn event_type(&self) -> &'static str {
        TOO_MANY_FAILURES_EVENT_TYPE
    }

    fn aggregate_type(&self) -> &'static str {
        AGGREGATE_TYPE
    }

    fn aggregate_id(&self) -> String {
        aggregate_id(&self.mobile, &self.scope)
    }

    fn event_id(&self) -> &EventId {
        &self.id
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.when
    }
}
