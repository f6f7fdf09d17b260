//! SMS Verification Service Library
//!
//! 短信验证码防爆破：记录验证码不匹配次数，达到阈值时发布锁定事件
//!
//! 分层：
//! - `domain`: 值对象、领域事件、尝试存储接口、键派生
//! - `application`: 不匹配 / 验证成功处理器、事件分发
//! - `infrastructure`: Redis 与内存实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
