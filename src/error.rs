//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the error type returned by request handlers and
//! by the task store. It implements `actix_web::error::ResponseError`, so an error
//! that reaches the framework becomes an HTTP response with a JSON body of the form
//! `{"error": "..."}`.
//!
//! Form-level failures on the register and login pages (taken email, bad
//! credentials) are not routed through here: those handlers re-render the page
//! with a message instead. `AppError` covers the explicit rejections.

use actix_web::{error::BlockingError, error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur while serving a request.
#[derive(Debug)]
pub enum AppError {
    /// No authenticated user on a route that requires one (HTTP 401).
    Unauthorized(String),
    /// The task does not exist or is not owned by the caller (HTTP 404).
    NotFound(String),
    /// A uniqueness rule was violated, e.g. an email that is already registered (HTTP 409).
    Conflict(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error originating from database operations (HTTP 500).
    DatabaseError(String),
    /// Failed input validation (HTTP 422 Unprocessable Entity).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            // Database details stay in the log, never in the response body.
            AppError::DatabaseError(msg) => {
                log::error!("database error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound` and a unique-constraint violation becomes
/// `Conflict`; everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Record already exists".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("Migration failed: {}", error))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// The blocking pool refused or lost a job (password hashing runs there).
impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
