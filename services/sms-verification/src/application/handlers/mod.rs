//! 事件处理器

mod mismatch_handler;
mod verified_handler;

pub use mismatch_handler::*;
pub use verified_handler::*;
