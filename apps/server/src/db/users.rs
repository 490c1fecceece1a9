//! Database queries for users.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::entity::user::{self, ActiveModel, Column, Entity as User};
use crate::error::AppResult;

use super::DbPool;

impl DbPool {
    /// Insert a user.
    ///
    /// A duplicate email trips the unique index and comes back as
    /// `AppError::Conflict` through the `DbErr` conversion.
    pub async fn insert_user(&self, email: &str, password_hash: &str) -> AppResult<user::Model> {
        let model = ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(self.connection()).await?)
    }

    /// Find a user by (normalized) email.
    pub async fn find_user_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        let user = User::find()
            .filter(Column::Email.eq(email))
            .one(self.connection())
            .await?;

        Ok(user)
    }
}
