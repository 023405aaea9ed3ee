use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered account. The email is the login key.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// bcrypt hash; never leaves the server.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
