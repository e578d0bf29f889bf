use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; the email must not already exist
    async fn create(&self, user: &User) -> UserResult<()>;

    /// Look up a user by email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> UserResult<()> {
        let mut users = self.users.write().await;

        let email_exists = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email));

        if email_exists {
            return Err(UserError::DuplicateEmail(user.email.clone()));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned();
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("Alice", "alice@example.com", "s3cret-pass").unwrap();

        repo.create(&user).await.unwrap();

        let fetched = repo.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(fetched.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("Alice", "alice@example.com", "s3cret-pass").unwrap();
        repo.create(&user).await.unwrap();

        let fetched = repo.find_by_email("Alice@Example.COM").await.unwrap();
        assert!(fetched.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_fails() {
        let repo = InMemoryUserRepository::new();
        let first = User::new("Alice", "alice@example.com", "s3cret-pass").unwrap();
        let second = User::new("Other Alice", "ALICE@example.com", "other-pass").unwrap();

        repo.create(&first).await.unwrap();

        let result = repo.create(&second).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_find_missing_email_is_none() {
        let repo = InMemoryUserRepository::new();
        let fetched = repo.find_by_email("nobody@example.com").await.unwrap();
        assert!(fetched.is_none());
    }
}
