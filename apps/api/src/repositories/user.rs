//! User-specific repository operations

use uuid::Uuid;

use super::base::{select_list, Repository};
use crate::models::User;
use crate::store::{Entity, StoreError};

impl<'s> Repository<'s, User> {
    /// Find a user by email address (case-insensitive)
    pub async fn find_by_email(&mut self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE email = $1",
            select_list::<User>(),
            User::TABLE
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email.to_lowercase())
            .fetch_optional(&mut *self.session().conn()?)
            .await?)
    }

    /// Find a user by their unique handle
    pub async fn find_by_username(&mut self, username: &str) -> Result<Option<User>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE username = $1",
            select_list::<User>(),
            User::TABLE
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&mut *self.session().conn()?)
            .await?)
    }

    /// Check whether an email address is already registered
    pub async fn email_exists(&mut self, email: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.to_lowercase())
                .fetch_one(&mut *self.session().conn()?)
                .await?;
        Ok(exists)
    }

    /// Mark a user account as verified
    pub async fn mark_verified(&mut self, user_id: Uuid) -> Result<User, StoreError> {
        let sql = format!(
            "UPDATE {} SET is_verified = true, updated_at = now() WHERE id = $1 RETURNING {}",
            User::TABLE,
            select_list::<User>()
        );
        let result = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&mut *self.session().conn()?)
            .await;
        self.finish_write(result)
            .await?
            .ok_or_else(|| StoreError::not_found(User::KIND, user_id))
    }
}
