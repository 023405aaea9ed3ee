//! Persistence for users and tasks.
//!
//! `Store` wraps a sqlx connection pool. It is constructed once at startup and
//! handed to handlers through `web::Data`; every operation is a single statement
//! on a pooled connection, borrowed for the duration of the call only. The guard
//! returns it to the pool on drop, error paths included.

mod tasks;
mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::AppError;

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens the database at `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            // Writers on a file database wait for each other instead of failing.
            .busy_timeout(Duration::from_secs(5));

        let pool = if is_in_memory(database_url) {
            // An in-memory database lives and dies with its connection, so keep exactly one.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Round-trips a trivial query; used by the health check.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
