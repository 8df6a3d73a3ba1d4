// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{check_path_handler, configure_handler, health_handler, settings_handler};
use super::middleware::{form_body_limit, request_id_layers};
use crate::store::ConfigurationStore;
use axum::{routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConfigurationStore>,
}

pub fn create_router(store: Arc<ConfigurationStore>) -> Router {
    let state = AppState { store };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/health", get(health_handler))
        .route("/settings", get(settings_handler))
        .route("/configure", post(configure_handler))
        .route("/check-path", get(check_path_handler))
        .layer(form_body_limit())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
