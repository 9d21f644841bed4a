#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "Domain models, persistence, authentication, services, routing and error"]
#![doc = "handling for the todo API. The binary (`main.rs`) wires them to Postgres"]
#![doc = "and runs the HTTP server; the integration tests wire them to `MemoryStore`."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::state::AppState;
