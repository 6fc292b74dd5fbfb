//! User service trait definition.

use crate::dto::{
    CreateUserRequest, MessageResponse, UpdateUserRequest, UserDetailResponse, UserResponse,
};
use async_trait::async_trait;
use roster_core::{HealthReport, RosterResult, UserId};

/// User service trait.
///
/// Keeps the cache consistent with the record store on every path that
/// reads or writes a user.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse>;

    /// Gets a user by ID, from the cache when possible.
    async fn get_user(&self, id: UserId) -> RosterResult<UserDetailResponse>;

    /// Lists all users straight from the record store.
    async fn list_users(&self) -> RosterResult<Vec<UserResponse>>;

    /// Updates the supplied fields of a user.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> RosterResult<MessageResponse>;

    /// Probes the record store and the cache. Never fails.
    async fn health_check(&self) -> HealthReport;
}
