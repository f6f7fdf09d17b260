//! smsv-adapter-redis - Redis 适配器

mod attempt_set;
mod config;
mod connection;
mod pubsub;

pub use attempt_set::*;
pub use config::*;
pub use connection::*;
pub use pubsub::*;
