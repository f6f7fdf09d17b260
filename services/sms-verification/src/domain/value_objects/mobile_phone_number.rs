//! 手机号值对象

use serde::{Deserialize, Serialize};
use std::fmt;

/// 手机号值对象
///
/// 可选的前导 `+` 加 6-15 位数字，字符串形式即规范形式
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobilePhoneNumber(String);

impl MobilePhoneNumber {
    const MIN_DIGITS: usize = 6;
    const MAX_DIGITS: usize = 15;

    /// 创建新的手机号
    pub fn new(value: impl Into<String>) -> Result<Self, MobilePhoneNumberError> {
        let value = value.into();
        let trimmed = value.trim();

        if !Self::is_valid(trimmed) {
            return Err(MobilePhoneNumberError::InvalidFormat(value));
        }

        Ok(Self(trimmed.to_string()))
    }

    fn is_valid(value: &str) -> bool {
        let digits = value.strip_prefix('+').unwrap_or(value);
        (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// 脱敏显示，只保留末四位
    pub fn masked(&self) -> String {
        let visible = 4.min(self.0.len());
        let (head, tail) = self.0.split_at(self.0.len() - visible);
        format!("{}{}", "*".repeat(head.len()), tail)
    }
}

impl fmt::Display for MobilePhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MobilePhoneNumber {
    type Error = MobilePhoneNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MobilePhoneNumber> for String {
    fn from(value: MobilePhoneNumber) -> Self {
        value.0
    }
}

/// 手机号错误
#[derive(Debug, thiserror::Error)]
pub enum MobilePhoneNumberError {
    #[error("Invalid mobile phone number: {0}")]
    InvalidFormat(String),
}
