//! HTTP front end for emotion-flavored newsletter summaries.
//!
//! The JSON API lives under `/api`; `/` serves the embedded single-page UI.

pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use bulletin_runtime_config::ServerSettings;
use bulletin_summary::Orchestrator;
use store::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub orchestrator: Orchestrator,
    pub settings: ServerSettings,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, settings: ServerSettings) -> Self {
        Self {
            sessions: SessionStore::new(settings.session_ttl_secs),
            orchestrator,
            settings,
        }
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Orchestrator {
    fn from_ref(state: &AppState) -> Self {
        state.orchestrator.clone()
    }
}

impl FromRef<AppState> for ServerSettings {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}

/// Build the full router with tracing and CORS layers applied.
pub fn build_app(state: AppState) -> Router {
    let upload_limit = state.settings.max_upload_bytes;

    let api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/options", get(routes::health::options))
        // Documents
        .route("/extract", post(routes::extract::extract_document))
        // Sessions
        .route("/sessions", post(routes::sessions::create_session))
        .route(
            "/sessions/{id}",
            get(routes::sessions::get_session).delete(routes::sessions::delete_session),
        )
        .route("/sessions/{id}/generate", post(routes::sessions::generate))
        .route(
            "/sessions/{id}/select",
            post(routes::sessions::select_for_translation),
        )
        .route(
            "/sessions/{id}/summaries/{emotion}",
            put(routes::sessions::edit_summary).delete(routes::sessions::reset_summary),
        )
        .route("/sessions/{id}/translate", post(routes::sessions::translate))
        .route(
            "/sessions/{id}/translations/{language}",
            put(routes::sessions::edit_translation),
        )
        // Extracted text comes back through the JSON actions, so they share
        // the upload limit.
        .layer(DefaultBodyLimit::max(upload_limit));

    Router::new()
        .nest("/api", api)
        .route("/", get(routes::ui::index))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
