//! ports - 抽象 trait 层
//!
//! 定义基础设施的抽象接口

mod event_publisher;

pub use event_publisher::*;
