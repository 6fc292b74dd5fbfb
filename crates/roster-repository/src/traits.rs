//! Record store trait definitions.

use roster_core::{RosterResult, UserId, UserPatch, UserRecord};
use async_trait::async_trait;

/// Durable store of user records.
///
/// Every mutating call is a single statement and therefore atomic.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user and returns the id assigned by the store.
    ///
    /// Constraint violations are reported as `RosterError::Conflict`.
    async fn insert(&self, username: &str, email: &str) -> RosterResult<UserId>;

    /// Finds a user by ID.
    async fn fetch_by_id(&self, id: UserId) -> RosterResult<Option<UserRecord>>;

    /// Returns every user, ordered by id.
    async fn fetch_all(&self) -> RosterResult<Vec<UserRecord>>;

    /// Applies the supplied fields of `patch` and returns the full updated row,
    /// or `None` when no row has this id.
    async fn update_by_id(&self, id: UserId, patch: &UserPatch) -> RosterResult<Option<UserRecord>>;

    /// Deletes a user, returning the id when a row was removed.
    async fn delete_by_id(&self, id: UserId) -> RosterResult<Option<UserId>>;

    /// Trivial round trip to the store.
    async fn ping(&self) -> RosterResult<bool>;
}
