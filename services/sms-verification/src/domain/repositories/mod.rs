//! 仓储接口

mod mismatch_attempt_store;

pub use mismatch_attempt_store::*;
