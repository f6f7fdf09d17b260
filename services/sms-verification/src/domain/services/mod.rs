//! 领域服务

mod attempt_key;

pub use attempt_key::*;
