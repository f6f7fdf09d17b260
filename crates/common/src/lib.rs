//! common - 通用类型和工具库

pub mod clock;
pub mod retry;
pub mod types;

pub use clock::*;
pub use retry::*;
pub use types::*;
