#![doc = "The `todoforge` library crate."]
#![doc = ""]
#![doc = "Credential handling, the session resolver, the owner-scoped task store, the"]
#![doc = "HTTP routes and the page views of the to-do application. The binary (`main.rs`)"]
#![doc = "reads the configuration, builds the shared state and runs the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod views;

pub use crate::auth::Credentials;
pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::store::Store;
