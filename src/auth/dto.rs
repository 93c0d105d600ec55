use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::{Role, User};

/// Request body for signup. Fields default to empty so an absent field and
/// an empty one fail validation the same way.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// External view of a user. There is no password field here at all, so
/// exposing the hash is a type error rather than a forgotten strip.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Envelope for responses carrying a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "A".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            role: Role::User,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn public_user_never_contains_password() {
        let json = serde_json::to_string(&PublicUser::from(sample_user())).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("a@x.com"));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn user_response_omits_absent_message() {
        let body = UserResponse {
            success: true,
            message: None,
            user: sample_user().into(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("message"));
        assert!(json.contains("\"success\":true"));
    }

    #[test]
    fn signup_request_defaults_missing_fields_to_empty() {
        let req: SignupRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert!(req.name.is_empty());
        assert_eq!(req.email, "a@x.com");
        assert!(req.password.is_empty());
    }
}
