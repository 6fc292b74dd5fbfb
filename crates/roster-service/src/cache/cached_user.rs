use roster_core::{UserId, UserRecord};
use serde::{Deserialize, Serialize};

/// Cached projection of a user record. The id is carried by the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedUser {
    pub username: String,
    pub email: String,
}

impl CachedUser {
    /// Rebuilds the full record for the id the entry was stored under.
    #[must_use]
    pub fn into_record(self, id: UserId) -> UserRecord {
        UserRecord::new(id, self.username, self.email)
    }
}

impl From<&UserRecord> for CachedUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            email: record.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_with_colon_survives() {
        let record = UserRecord::new(UserId::new(3), "carol", "carol:work@example.com");
        let json = serde_json::to_string(&CachedUser::from(&record)).unwrap();
        let decoded: CachedUser = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.into_record(UserId::new(3)), record);
    }
}
