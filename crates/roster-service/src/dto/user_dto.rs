//! User-related DTOs.

use roster_core::{UserId, UserPatch, UserRecord};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user.
///
/// Absent fields deserialize as empty strings and are rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub email: String,
}

impl CreateUserRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Request to update a user. Only supplied fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: Option<String>,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Returns true when neither field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(request: UpdateUserRequest) -> Self {
        Self::new(request.username, request.email)
    }
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
        }
    }
}

/// Single-user read response, flagging whether it was served from the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDetailResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub cached: bool,
}

impl UserDetailResponse {
    /// Builds the response from a record and its origin.
    #[must_use]
    pub fn from_record(record: UserRecord, cached: bool) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            cached,
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User 1 deleted")]
    pub message: String,
}

impl MessageResponse {
    /// Creates a new message response.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
