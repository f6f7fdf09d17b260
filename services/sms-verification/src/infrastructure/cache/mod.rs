//! 尝试存储实现

mod in_memory_mismatch_attempt_store;
mod redis_mismatch_attempt_store;

pub use in_memory_mismatch_attempt_store::*;
pub use redis_mismatch_attempt_store::*;
