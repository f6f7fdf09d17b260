//! 尝试集合键派生

use crate::domain::value_objects::{MobilePhoneNumber, SmsVerificationScope};

/// 不匹配尝试集合的键前缀
pub const MISMATCH_KEY_PREFIX: &str = "sms.verification.code.mismatch";

/// 由 (手机号, 用途) 派生尝试集合的存储键
///
/// 用途不含 `.`，手机号只含数字和前导 `+`，所以不同的组合不会得到相同的键
pub fn mismatch_attempts_key(mobile: &MobilePhoneNumber, scope: &SmsVerificationScope) -> String {
    format!("{}.{}.{}", MISMATCH_KEY_PREFIX, mobile.value(), scope.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mobile(s: &str) -> MobilePhoneNumber {
        MobilePhoneNumber::new(s).unwrap()
    }

    fn scope(s: &str) -> SmsVerificationScope {
        SmsVerificationScope::new(s).unwrap()
    }

    #[test]
    fn test_key_format() {
        assert_eq!(
            mismatch_attempts_key(&mobile("13800138000"), &scope("SIGN_IN")),
            "sms.verification.code.mismatch.13800138000.SIGN_IN"
        );
    }

    #[test]
    fn test_key_is_deterministic() {
        let a = mismatch_attempts_key(&mobile("13800138000"), &scope("SIGN_IN"));
        let b = mismatch_attempts_key(&mobile("13800138000"), &scope("SIGN_IN"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_subjects_get_different_keys() {
        let base = mismatch_attempts_key(&mobile("13800138000"), &scope("SIGN_IN"));
        assert_ne!(base, mismatch_attempts_key(&mobile("13800138001"), &scope("SIGN_IN")));
        assert_ne!(base, mismatch_attempts_key(&mobile("13800138000"), &scope("SIGN_UP")));
        assert_ne!(base, mismatch_attempts_key(&mobile("+13800138000"), &scope("SIGN_IN")));
    }
}
