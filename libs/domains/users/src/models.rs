use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// User display name
    pub name: String,
    /// User email (unique)
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Construct a new user, hashing the supplied password with Argon2.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
    ) -> UserResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?
            .to_string();

        Ok(Self {
            id: Uuid::now_v7(),
            name: name.into(),
            email: email.into(),
            password_hash,
            created_at: Utc::now(),
        })
    }

    /// Verify a candidate password against the stored hash.
    ///
    /// An unparsable stored hash counts as a mismatch rather than an error,
    /// so a corrupted record cannot be logged into.
    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

/// User response DTO (without the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Credentials for requesting an access token
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Issued access token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_hashes_password() {
        let user = User::new("Alice", "alice@example.com", "s3cret-pass").unwrap();
        assert!(!user.id.is_nil());
        assert_ne!(user.password_hash, "s3cret-pass");
        assert!(user.verify_password("s3cret-pass"));
        assert!(!user.verify_password("wrong-pass"));
    }

    #[test]
    fn test_corrupted_hash_never_verifies() {
        let mut user = User::new("Alice", "alice@example.com", "s3cret-pass").unwrap();
        user.password_hash = "not-a-phc-string".to_string();
        assert!(!user.verify_password("s3cret-pass"));
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User::new("Alice", "alice@example.com", "s3cret-pass").unwrap();
        let encoded = serde_json::to_string(&user).unwrap();
        assert!(!encoded.contains("password_hash"));
        assert!(encoded.contains("alice@example.com"));
    }

    #[test]
    fn test_create_user_validation() {
        use validator::Validate;

        let valid = CreateUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "s3cret-pass".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateUser {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = CreateUser {
            password: "abc".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }
}
