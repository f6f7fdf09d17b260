//! 领域事件

mod sms_verification_events;

pub use sms_verification_events::*;
