//! PostgreSQL implementation of the user repository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::User,
    repository::UserRepository,
};

#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(err: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", err))
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> UserResult<()> {
        let email_taken = self.find_by_email(&user.email).await?.is_some();
        if email_taken {
            return Err(UserError::DuplicateEmail(user.email.clone()));
        }

        let active_model: entity::ActiveModel = user.into();
        entity::Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        tracing::info!(user_id = %user.id, email = %user.email, "Created user");
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }
}
