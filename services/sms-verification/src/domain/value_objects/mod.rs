//! 值对象

mod mobile_phone_number;
mod verification_scope;

pub use mobile_phone_number::*;
pub use verification_scope::*;
