//! # Roster Service
//!
//! Business logic for user records: validation, cache-aside reads and
//! cache maintenance around every store write.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::UserServiceImpl;
pub use user_service::*;
