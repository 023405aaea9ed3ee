use chrono::Utc;

use super::Store;
use crate::error::AppError;
use crate::models::User;

impl Store {
    /// Inserts a new user. A taken email is reported as `AppError::Conflict`,
    /// whether it is caught by the lookup or by the unique index under a race.
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        if self.find_user_by_email(email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".into()));
        }

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, created_at) VALUES ($1, $2, $3)
             RETURNING id, email, password_hash, created_at",
        )
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Email already registered".into()),
            other => other,
        })?;

        log::info!("registered user {}", user.id);
        Ok(user)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
