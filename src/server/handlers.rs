// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::SettingsError;
use crate::settings::Settings;
use crate::store::{ConfigureRequest, PathCheck, StartupReport};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub path: String,
    pub collecting_metrics_period_in_seconds: u64,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    /// Effective endpoint path, `urlName + additionalPath`.
    pub path: String,
    pub settings: Settings,
    pub startup: StartupReport,
}

#[derive(Debug, Deserialize)]
pub struct CheckPathQuery {
    #[serde(default)]
    pub value: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let settings = state.store.snapshot();

    Json(HealthResponse {
        status: "ok".to_string(),
        path: settings.effective_path(),
        collecting_metrics_period_in_seconds: settings.collecting_metrics_period_in_seconds(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn settings_handler(State(state): State<AppState>) -> Json<SettingsResponse> {
    let settings = state.store.snapshot();
    Json(settings_response(&state, &settings))
}

/// Handler for /configure (settings form submission)
pub async fn configure_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<SettingsResponse>, SettingsError> {
    // Manually deserialize to get better error messages
    let request: ConfigureRequest = serde_json::from_str(&body).map_err(|e| {
        debug!("Rejected settings form: {}", e);
        SettingsError::InvalidRequest(format!("JSON deserialization error: {}", e))
    })?;

    info!("Received settings form: path={}", request.path);

    // Saving touches the disk; keep it off the async workers.
    let store = state.store.clone();
    let settings = tokio::task::spawn_blocking(move || store.apply_update(request))
        .await
        .map_err(|e| {
            error!("Settings update task failed: {}", e);
            SettingsError::Internal(e.to_string())
        })??;

    Ok(Json(settings_response(&state, &settings)))
}

pub async fn check_path_handler(
    State(state): State<AppState>,
    Query(query): Query<CheckPathQuery>,
) -> Json<PathCheck> {
    Json(state.store.check_path(&query.value))
}

fn settings_response(state: &AppState, settings: &Settings) -> SettingsResponse {
    SettingsResponse {
        path: settings.effective_path(),
        settings: settings.clone(),
        startup: state.store.report().clone(),
    }
}
