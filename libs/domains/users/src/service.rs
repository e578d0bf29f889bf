use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User, UserResponse};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user with a hashed password.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = User::new(input.name, input.email, &input.password)?;
        self.repository.create(&user).await?;
        Ok(user.into())
    }

    /// Verify credentials and return the matching user.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> UserResult<User> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !user.verify_password(password) {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }
}
