//! Lookaside cache for the service layer.
//!
//! Holds a projection of user records keyed by id. Entries may vanish at any
//! time; callers treat every failure here as a miss or a skipped write.

mod cache_interface;
pub mod cache_keys;
mod cached_user;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use cached_user::CachedUser;
pub use redis_cache::RedisCacheService;
