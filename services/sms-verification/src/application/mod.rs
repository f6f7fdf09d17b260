//! 应用层

pub mod handlers;
pub mod listeners;
