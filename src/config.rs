use crate::auth::token::DEFAULT_TOKEN_TTL_MINUTES;
use std::env;
use std::fmt;

/// Signing secret used when `SECRET_KEY` is not set. Only suitable for local development.
pub const INSECURE_DEFAULT_SECRET: &str = "insecure-development-secret-change-me";

/// Longest accepted `ACCESS_TOKEN_EXPIRE_MINUTES`: one year.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Errors that stop the process before the server binds.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub token_ttl_minutes: i64,
    pub server_port: u16,
    pub server_host: String,
    pub cookie_secure: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let secret_key = lookup("SECRET_KEY")
            .filter(|secret| !secret.is_empty())
            .unwrap_or_else(|| INSECURE_DEFAULT_SECRET.to_string());

        let token_ttl_minutes = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(value) => match value.trim().parse::<i64>() {
                Ok(minutes) if (1..=MAX_TOKEN_TTL_MINUTES).contains(&minutes) => minutes,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                        value,
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let server_port = match lookup("SERVER_PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "SERVER_PORT",
                value,
            })?,
            None => 8080,
        };

        let cookie_secure = match lookup("COOKIE_SECURE").as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "COOKIE_SECURE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            database_url,
            secret_key,
            token_ttl_minutes,
            server_port,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            cookie_secure,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == INSECURE_DEFAULT_SECRET
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes)
    }
}
