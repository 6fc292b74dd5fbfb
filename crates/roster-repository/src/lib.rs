//! # Roster Repository
//!
//! Record store for user rows, the source of truth behind the lookaside cache.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserStore>
//! PgUserStore
//!   ↓  Arc<DatabasePool>
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::PgUserStore;
pub use traits::*;
