//! 事件监听

mod verification_event_listener;

pub use verification_event_listener::*;
