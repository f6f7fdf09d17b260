//! smsv-event-core - 事件核心库
//!
//! DomainEvent trait、Event Handler、事件分发

mod domain_event;
mod event_handler;

pub use domain_event::*;
pub use event_handler::*;
