// service/src/lib.rs

//! REST shell around the `shopcart` aggregate: actix-web routes, request
//! guards, HTTP error mapping, configuration and the PostgreSQL store.

pub mod config;
pub mod db;
pub mod errors;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
