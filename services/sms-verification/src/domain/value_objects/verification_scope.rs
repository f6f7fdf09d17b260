//! 验证码用途值对象

use serde::{Deserialize, Serialize};
use std::fmt;

/// 验证码用途（例如 `SIGN_IN`、`RESET_PASSWORD`）
///
/// 仅允许字母、数字、`_` 和 `-`，因此不会包含存储键的分隔符 `.`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SmsVerificationScope(String);

impl SmsVerificationScope {
    const MAX_LEN: usize = 64;

    /// 创建新的用途
    pub fn new(value: impl Into<String>) -> Result<Self, SmsVerificationScopeError> {
        let value = value.into();

        if value.is_empty() {
            return Err(SmsVerificationScopeError::Empty);
        }
        if value.len() > Self::MAX_LEN {
            return Err(SmsVerificationScopeError::TooLong(value.len()));
        }
        if !value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            return Err(SmsVerificationScopeError::InvalidCharacters(value));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SmsVerificationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SmsVerificationScope {
    type Error = SmsVerificationScopeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SmsVerificationScope> for String {
    fn from(value: SmsVerificationScope) -> Self {
        value.0
    }
}

/// 用途错误
#[derive(Debug, thiserror::Error)]
pub enum SmsVerificationScopeError {
    #[error("Verification scope cannot be empty")]
    Empty,

    #[error("Verification scope too long: {0} characters")]
    TooLong(usize),

    #[error("Verification scope contains invalid characters: {0}")]
    InvalidCharacters(String),
}
