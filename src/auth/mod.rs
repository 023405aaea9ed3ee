pub mod password;
pub mod session;
pub mod token;

use serde::Deserialize;
use validator::Validate;

// Re-export necessary items
pub use password::{hash_password, verify_password};
pub use session::{AuthenticatedUser, MaybeUser, SESSION_COOKIE};
pub use token::{Claims, Credentials};

/// Form body of `POST /login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Form body of `POST /register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Must be a valid email address; it becomes the login key.
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Emails are compared case-insensitively, so they are stored lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_form_validation() {
        let valid = LoginForm {
            email: "test@example.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid_email = LoginForm {
            email: "testexample.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(invalid_email.validate().is_err());

        let empty_password = LoginForm {
            email: "test@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_register_form_validation() {
        let valid = RegisterForm {
            email: "a@x.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid_email = RegisterForm {
            email: "not an email".to_string(),
            password: "pw".to_string(),
        };
        assert!(invalid_email.validate().is_err());

        let too_long = RegisterForm {
            email: "a@x.com".to_string(),
            password: "p".repeat(129),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.com "), "a@x.com");
    }
}
