use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use bulletin_core::{Emotion, GenerationParams, Language, SessionState};
use bulletin_summary::{Failure, Orchestrator};

use crate::error::ApiErr;
use crate::models::{EditRequest, SelectRequest, SessionResponse, TranslateRequest};
use crate::store::{SessionHandle, SessionStore};

fn find_session(store: &SessionStore, id: &str) -> Result<Arc<SessionHandle>, ApiErr> {
    Uuid::parse_str(id)
        .ok()
        .and_then(|id| store.get(&id))
        .ok_or_else(|| ApiErr::not_found("session not found"))
}

fn parse_emotion(raw: &str) -> Result<Emotion, ApiErr> {
    raw.parse::<Emotion>()
        .map_err(|e| ApiErr::bad_request(e.to_string()))
}

fn parse_language(raw: &str) -> Result<Language, ApiErr> {
    raw.parse::<Language>()
        .map_err(|e| ApiErr::bad_request(e.to_string()))
}

fn respond(
    handle: &SessionHandle,
    state: &SessionState,
    failures: Vec<Failure>,
) -> Json<SessionResponse> {
    Json(SessionResponse::new(handle, state.view(), failures))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// POST /api/sessions — start an empty session.
pub async fn create_session(
    State(store): State<SessionStore>,
) -> (StatusCode, Json<SessionResponse>) {
    let handle = store.create();
    let state = handle.state.lock().await;
    let body = respond(&handle, &state, Vec::new());
    (StatusCode::CREATED, body)
}

/// GET /api/sessions/:id — current view of a session.
pub async fn get_session(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiErr> {
    let handle = find_session(&store, &id)?;
    let state = handle.state.lock().await;
    Ok(respond(&handle, &state, Vec::new()))
}

/// DELETE /api/sessions/:id
pub async fn delete_session(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiErr> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiErr::not_found("session not found"))?;
    if !store.remove(&id) {
        return Err(ApiErr::not_found("session not found"));
    }
    tracing::info!(session = %id, "session deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// POST /api/sessions/:id/generate — produce all three emotion summaries.
///
/// Per-call failures come back as inline "Error: ..." panel text and are
/// also listed in `failures`; only invalid input is rejected outright.
pub async fn generate(
    State(store): State<SessionStore>,
    State(orchestrator): State<Orchestrator>,
    Path(id): Path<String>,
    body: Result<Json<GenerationParams>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiErr> {
    let Json(params) = body?;
    let handle = find_session(&store, &id)?;
    let mut state = handle.state.lock().await;
    let report = orchestrator.generate(&mut state, &params).await?;
    if !report.is_clean() {
        tracing::warn!(
            session = %handle.id,
            failures = report.failures.len(),
            "batch finished with failures"
        );
    }
    Ok(respond(&handle, &state, report.failures))
}

/// POST /api/sessions/:id/select — choose the summary to translate.
pub async fn select_for_translation(
    State(store): State<SessionStore>,
    Path(id): Path<String>,
    body: Result<Json<SelectRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiErr> {
    let Json(req) = body?;
    let handle = find_session(&store, &id)?;
    let mut state = handle.state.lock().await;
    state.select_for_translation(req.emotion, req.text)?;
    Ok(respond(&handle, &state, Vec::new()))
}

/// PUT /api/sessions/:id/summaries/:emotion — save the user's edit.
pub async fn edit_summary(
    State(store): State<SessionStore>,
    Path((id, emotion)): Path<(String, String)>,
    body: Result<Json<EditRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiErr> {
    let Json(req) = body?;
    let emotion = parse_emotion(&emotion)?;
    let handle = find_session(&store, &id)?;
    let mut state = handle.state.lock().await;
    state.edit_summary(emotion, req.text)?;
    Ok(respond(&handle, &state, Vec::new()))
}

/// DELETE /api/sessions/:id/summaries/:emotion — discard the user's edit.
pub async fn reset_summary(
    State(store): State<SessionStore>,
    Path((id, emotion)): Path<(String, String)>,
) -> Result<Json<SessionResponse>, ApiErr> {
    let emotion = parse_emotion(&emotion)?;
    let handle = find_session(&store, &id)?;
    let mut state = handle.state.lock().await;
    state.reset_edit(emotion)?;
    Ok(respond(&handle, &state, Vec::new()))
}

// ---------------------------------------------------------------------------
// Translations
// ---------------------------------------------------------------------------

/// POST /api/sessions/:id/translate — translate the selected summary.
pub async fn translate(
    State(store): State<SessionStore>,
    State(orchestrator): State<Orchestrator>,
    Path(id): Path<String>,
    body: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiErr> {
    let Json(req) = body?;
    let handle = find_session(&store, &id)?;
    let mut state = handle.state.lock().await;
    let report = orchestrator.translate(&mut state, &req.languages).await?;
    if !report.is_clean() {
        tracing::warn!(
            session = %handle.id,
            failures = report.failures.len(),
            "batch finished with failures"
        );
    }
    Ok(respond(&handle, &state, report.failures))
}

/// PUT /api/sessions/:id/translations/:language — save an edited translation.
pub async fn edit_translation(
    State(store): State<SessionStore>,
    Path((id, language)): Path<(String, String)>,
    body: Result<Json<EditRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiErr> {
    let Json(req) = body?;
    let language = parse_language(&language)?;
    let handle = find_session(&store, &id)?;
    let mut state = handle.state.lock().await;
    state.edit_translation(language, req.text)?;
    Ok(respond(&handle, &state, Vec::new()))
}
