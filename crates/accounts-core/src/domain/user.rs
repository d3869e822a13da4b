//! User entity.

use super::role::UserRole;
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical user record as stored in the `users` table.
///
/// This is also the shape written to the cache, so every field (including
/// the password hash) survives a cache round trip.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, assigned at creation.
    pub id: UserId,

    /// User's role.
    pub role: UserRole,

    /// Display name.
    pub name: String,

    /// Unique email address.
    pub email: String,

    /// Password hash produced by the hashing collaborator.
    pub password: String,

    /// Profile picture URL or path.
    pub image: Option<String>,

    /// Token correlating to the account-activation flow.
    pub activation_id: Option<String>,

    /// Token correlating to the password-reset flow.
    pub reset_password_id: Option<String>,

    /// Whether the account has been activated.
    pub is_activated: bool,

    /// Whether the account is banned.
    pub is_banned: bool,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Checks if the user is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("image", &self.image)
            .field("activation_id", &self.activation_id)
            .field("reset_password_id", &self.reset_password_id)
            .field("is_activated", &self.is_activated)
            .field("is_banned", &self.is_banned)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Values supplied by the application when inserting a user.
///
/// Role, flags, and `created_at` come from column defaults.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Generated identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password hash.
    pub password: String,
}

impl NewUser {
    /// Creates an insert payload with a freshly generated ID.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user() -> User {
        User {
            id: UserId::from("01890a5d-ac96-774b-bcce-b302099a8057"),
            role: UserRole::User,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "h".repeat(118),
            image: None,
            activation_id: Some("act-1".to_string()),
            reset_password_id: None,
            is_activated: false,
            is_banned: false,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_json_round_trip_restores_timestamp() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        let restored: User = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, user);
        assert_eq!(restored.created_at, user.created_at);
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("activationId").is_some());
        assert!(json.get("isActivated").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", sample_user());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains(&"h".repeat(118)));

        let new_user = NewUser::new("Ada", "ada@example.com", "secret-hash");
        assert!(!format!("{new_user:?}").contains("secret-hash"));
    }

    #[test]
    fn test_new_user_generates_id() {
        let a = NewUser::new("Ada", "ada@example.com", "x");
        let b = NewUser::new("Ada", "ada@example.com", "x");
        assert_ne!(a.id, b.id);
        assert!(!a.id.as_str().is_empty());
    }

    #[test]
    fn test_is_admin() {
        let mut user = sample_user();
        assert!(!user.is_admin());
        user.role = UserRole::Admin;
        assert!(user.is_admin());
    }
}
