//! smsv-bootstrap - 统一服务启动骨架
//!
//! 所有 worker 复用的启动逻辑

mod infrastructure;
mod runtime;
mod starter;

pub use infrastructure::*;
pub use runtime::*;
pub use starter::*;
