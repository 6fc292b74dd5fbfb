//! User domain types shared by the store, the cache, and the service.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// A user row as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl UserRecord {
    /// Creates a new user record.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Returns a copy of this record with the patch applied.
    ///
    /// Fields absent from the patch keep their current value.
    #[must_use]
    pub fn patched(&self, patch: &UserPatch) -> Self {
        Self {
            id: self.id,
            username: patch.username.clone().unwrap_or_else(|| self.username.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
        }
    }
}

/// Partial update of a user: each field is either supplied or left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    /// Creates a patch from optional fields.
    #[must_use]
    pub const fn new(username: Option<String>, email: Option<String>) -> Self {
        Self { username, email }
    }
}
