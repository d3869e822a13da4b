//! User-related DTOs.

use accounts_core::schema::UserCandidate;
use accounts_core::{User, UserId, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request to create a new user.
///
/// `password` is the hash produced by the hashing collaborator, not the
/// plaintext.
#[derive(Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    /// Creates a new request.
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Borrows the request as a partial record for validation.
    #[must_use]
    pub fn candidate(&self) -> UserCandidate<'_> {
        UserCandidate {
            name: Some(&self.name),
            email: Some(&self.email),
            password: Some(&self.password),
            ..UserCandidate::default()
        }
    }
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Request to change the role of a user.
///
/// `role` stays a string until validated so unknown names surface as
/// field errors rather than deserialization failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRoleRequest {
    pub id: String,
    pub role: String,
}

impl AddRoleRequest {
    /// Creates a new request.
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
        }
    }

    /// Borrows the request as a partial record for validation.
    #[must_use]
    pub fn candidate(&self) -> UserCandidate<'_> {
        UserCandidate {
            id: Some(&self.id),
            role: Some(&self.role),
            ..UserCandidate::default()
        }
    }
}

/// User as shown to callers: every stored field except the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub is_activated: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            name: user.name,
            email: user.email,
            image: user.image,
            is_activated: user.is_activated,
            is_banned: user.is_banned,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self::from(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accounts_core::schema::{validate_fields, UserField};

    fn create_test_user() -> User {
        User {
            id: UserId::generate(),
            role: UserRole::Moderator,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "h".repeat(118),
            image: Some("/img/ada.png".to_string()),
            activation_id: Some("act".to_string()),
            reset_password_id: None,
            is_activated: true,
            is_banned: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_request_candidate_covers_create_fields() {
        let request = CreateUserRequest::new("Ada", "ada@example.com", "h".repeat(118));
        let candidate = request.candidate();
        assert!(validate_fields(&candidate, &[UserField::Name, UserField::Email, UserField::Password]).is_ok());
        assert!(candidate.id.is_none());
    }

    #[test]
    fn test_create_request_debug_hides_password() {
        let request = CreateUserRequest::new("Ada", "ada@example.com", "secret-hash");
        assert!(!format!("{:?}", request).contains("secret-hash"));
    }

    #[test]
    fn test_add_role_request_deserializes_unknown_role() {
        let request: AddRoleRequest = serde_json::from_str(r#"{"id":"abc","role":"root"}"#).unwrap();
        let err = validate_fields(&request.candidate(), &[UserField::Id, UserField::Role]).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "role");
    }

    #[test]
    fn test_user_response_omits_password() {
        let user = create_test_user();
        let response = UserResponse::from(&user);
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("activationId").is_none());
        assert_eq!(json["role"], "moderator");
        assert_eq!(response.email, user.email);
    }
}
