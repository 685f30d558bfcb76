use axum::{extract::State, Json};

use crate::models::{HealthResponse, OptionsResponse};
use crate::store::SessionStore;
use bulletin_runtime_config::ServerSettings;

/// GET /api/health — server liveness check.
pub async fn health(State(sessions): State<SessionStore>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: sessions.len(),
    })
}

/// GET /api/options — emotions, languages and length choices for the form.
pub async fn options(State(settings): State<ServerSettings>) -> Json<OptionsResponse> {
    Json(OptionsResponse::new(settings.max_upload_bytes))
}
