//! Axum-based admin API for the configuration store.
//!
//! This module exposes the store to an external form layer: reading the
//! current settings, submitting a settings form and checking a candidate
//! endpoint path. It does not serve the metrics themselves.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual endpoints.
//! - `middleware`: Request ID tracking and request size limits.
//! - `routes`: The router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{CheckPathQuery, HealthResponse, SettingsResponse};
pub use routes::{create_router, AppState};
