//! Database models split into domain-specific modules.

pub mod availability;
pub mod common;
pub mod user;
pub mod vehicle;

pub use availability::*;
pub use common::*;
pub use user::*;
pub use vehicle::*;
