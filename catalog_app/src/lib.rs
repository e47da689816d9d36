// catalog_app/src/lib.rs

//! HTTP surface of the product catalog: routes, request parsing, the Postgres
//! store, concrete image backends and configuration.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
