use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use bulletin_runtime_config::ServerSettings;
use bulletin_server::{build_app, AppState};
use bulletin_summary::testing::{RequestKind, ScriptedBackend};
use bulletin_summary::{GenerationClient, GenerationError, Orchestrator};

const NEWSLETTER: &str = "Company X raised ten million dollars in a Series A round led by Fund Y.";

fn app_with(backend: Arc<ScriptedBackend>) -> Router {
    app_with_settings(backend, ServerSettings::default())
}

fn app_with_settings(backend: Arc<ScriptedBackend>, settings: ServerSettings) -> Router {
    let orchestrator = Orchestrator::new(GenerationClient::new(backend));
    build_app(AppState::new(orchestrator, settings))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn new_session(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

fn generate_body() -> Value {
    json!({
        "text": NEWSLETTER,
        "url": "https://ex.com/n1",
        "summary_length": 30,
        "title_length": 4,
        "language": "English"
    })
}

fn panel<'a>(view: &'a Value, emotion: &str) -> &'a Value {
    view["panels"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["emotion"] == emotion)
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app_with(Arc::new(ScriptedBackend::canned()));
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["sessions"], 0);
}

#[tokio::test]
async fn options_list_languages_and_lengths() {
    let app = app_with(Arc::new(ScriptedBackend::canned()));
    let (status, body) = send(&app, "GET", "/api/options", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["languages"].as_array().unwrap().len(), 9);
    assert_eq!(body["emotions"][0]["emotion"], "Excitement");
    assert_eq!(body["summary_lengths"], json!([30, 50, 100]));
    assert_eq!(body["title_length"]["default"], 4);
}

#[tokio::test]
async fn index_page_is_served() {
    let app = app_with(Arc::new(ScriptedBackend::canned()));
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("navigator.clipboard.writeText"));
    assert!(page.contains("✓ Copied"));
    // Links only for web URLs; otherwise a greyed label.
    assert!(page.contains("if (isWebUrl(panel.summary.url))"));
    assert!(page.contains(r#"label.className = "read-more-disabled""#));
    // Checkboxes mirror the session's target languages, unticking stale ones.
    assert!(page.contains("box.checked = view.target_languages.includes(box.value);"));
}

#[tokio::test]
async fn new_session_is_idle() {
    let app = app_with(Arc::new(ScriptedBackend::canned()));
    let id = new_session(&app).await;
    let (status, body) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phase"], "idle");
    assert_eq!(body["generate_clicked"], false);
    assert_eq!(body["panels"], json!([]));
}

#[tokio::test]
async fn generate_select_translate_and_edit() {
    let backend = Arc::new(ScriptedBackend::canned());
    let app = app_with(Arc::clone(&backend));
    let id = new_session(&app).await;

    let (status, view) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/generate"),
        Some(generate_body()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["phase"], "generated");
    assert_eq!(view["panels"].as_array().unwrap().len(), 3);
    assert_eq!(view["failures"], json!([]));
    let excited = panel(&view, "Excitement");
    let text = excited["text"].as_str().unwrap();
    assert!(text.starts_with("**Funding Round Sparks excitement**\n\n"));
    assert!(text.ends_with("\n\n[Read More](https://ex.com/n1)"));
    assert_eq!(backend.calls_of(RequestKind::Title).len(), 3);
    assert_eq!(backend.calls_of(RequestKind::Summary).len(), 3);

    let (status, view) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/select"),
        Some(json!({"emotion": "Interesting"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["selected_for_translation"], "Interesting");

    let (status, view) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/translate"),
        Some(json!({"languages": ["Spanish", "German"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["phase"], "translated");
    let translations = view["translations"].as_array().unwrap();
    assert_eq!(translations.len(), 2);
    assert!(translations
        .iter()
        .any(|t| t["language"] == "Spanish" && t["text"].as_str().unwrap().starts_with("[Spanish] **")));

    let (status, view) = send(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/translations/german"),
        Some(json!({"text": "Eigene Fassung"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let german = view["translations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["language"] == "German")
        .unwrap();
    assert_eq!(german["text"], "Eigene Fassung");
    assert_eq!(german["edited"], true);
}

#[tokio::test]
async fn edited_summary_is_the_translation_source() {
    let backend = Arc::new(ScriptedBackend::canned());
    let app = app_with(Arc::clone(&backend));
    let id = new_session(&app).await;
    send(&app, "POST", &format!("/api/sessions/{id}/generate"), Some(generate_body())).await;

    let (status, view) = send(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/summaries/confusion"),
        Some(json!({"text": "My own take"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(panel(&view, "Confusion")["text"], "My own take");

    send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/select"),
        Some(json!({"emotion": "Confusion"})),
    )
    .await;
    let (_, view) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/translate"),
        Some(json!({"languages": ["French"]})),
    )
    .await;
    assert_eq!(view["translations"][0]["text"], "[French] My own take");
    let sent = backend.calls_of(RequestKind::Translation);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user_text, "My own take");

    let (status, view) = send(
        &app,
        "DELETE",
        &format!("/api/sessions/{id}/summaries/Confusion"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(panel(&view, "Confusion")["text"]
        .as_str()
        .unwrap()
        .starts_with("**Funding"));
}

#[tokio::test]
async fn empty_text_is_rejected_without_calls() {
    let backend = Arc::new(ScriptedBackend::canned());
    let app = app_with(Arc::clone(&backend));
    let id = new_session(&app).await;

    let mut body = generate_body();
    body["text"] = json!("   ");
    let (status, err) = send(&app, "POST", &format!("/api/sessions/{id}/generate"), Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(err["error"].as_str().unwrap().starts_with("Please paste newsletter text"));
    assert!(backend.calls().is_empty());

    let (_, view) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(view["phase"], "idle");
}

#[tokio::test]
async fn translate_preconditions_have_distinct_warnings() {
    let backend = Arc::new(ScriptedBackend::canned());
    let app = app_with(Arc::clone(&backend));
    let id = new_session(&app).await;
    send(&app, "POST", &format!("/api/sessions/{id}/generate"), Some(generate_body())).await;

    let uri = format!("/api/sessions/{id}/translate");
    let (status, err) = send(&app, "POST", &uri, Some(json!({"languages": ["Spanish"]}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        err["error"],
        "Please select a summary for translation using the buttons above."
    );

    send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/select"),
        Some(json!({"emotion": "Excitement"})),
    )
    .await;
    let (status, err) = send(&app, "POST", &uri, Some(json!({"languages": []}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"], "Please select at least one target language.");
    assert!(backend.calls_of(RequestKind::Translation).is_empty());
}

#[tokio::test]
async fn failed_calls_render_inline_errors() {
    let backend = Arc::new(ScriptedBackend::failing_when(
        |req| RequestKind::of(req) == RequestKind::Summary,
        GenerationError::Status {
            status: 500,
            message: "boom".into(),
        },
    ));
    let app = app_with(backend);
    let id = new_session(&app).await;

    let (status, view) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/generate"),
        Some(generate_body()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["failures"].as_array().unwrap().len(), 3);
    let text = panel(&view, "Interesting")["text"].as_str().unwrap();
    assert!(text.contains("Error: generation service error (HTTP 500): boom"));
}

#[tokio::test]
async fn unknown_sessions_and_names_are_rejected() {
    let app = app_with(Arc::new(ScriptedBackend::canned()));
    let (status, err) = send(&app, "GET", "/api/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], "session not found");

    let missing = uuid::Uuid::new_v4();
    let (status, _) = send(&app, "GET", &format!("/api/sessions/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = new_session(&app).await;
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/summaries/joy"),
        Some(json!({"text": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, err) = send(
        &app,
        "PUT",
        &format!("/api/sessions/{id}/summaries/Excitement"),
        Some(json!({"text": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"], "No Excitement summary has been generated yet.");
}

#[tokio::test]
async fn deleted_sessions_are_gone() {
    let app = app_with(Arc::new(ScriptedBackend::canned()));
    let id = new_session(&app).await;
    let (status, _) = send(&app, "DELETE", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn multipart_request(file_name: &str, content_type: &str, contents: &[u8]) -> Request<Body> {
    let boundary = "bulletin-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    Request::post("/api/extract")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn extracts_uploaded_text_files() {
    let app = app_with(Arc::new(ScriptedBackend::canned()));
    let response = app
        .oneshot(multipart_request("issue.txt", "text/plain", NEWSLETTER.as_bytes()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "plain_text");
    assert_eq!(body["file_name"], "issue.txt");
    assert_eq!(body["text"], NEWSLETTER);
}

#[tokio::test]
async fn unsupported_uploads_are_refused() {
    let app = app_with(Arc::new(ScriptedBackend::canned()));
    let response = app
        .oneshot(multipart_request("photo.png", "image/png", b"\x89PNG"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn corrupt_docx_reports_a_readable_error() {
    let app = app_with(Arc::new(ScriptedBackend::canned()));
    let response = app
        .oneshot(multipart_request(
            "issue.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            b"not a zip archive",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Error reading DOCX"));
}

#[tokio::test]
async fn generate_accepts_text_larger_than_axum_default_limit() {
    let backend = Arc::new(ScriptedBackend::canned());
    let app = app_with(Arc::clone(&backend));
    let id = new_session(&app).await;

    let mut body = generate_body();
    body["text"] = json!("newsletter ".repeat(300_000));
    let (status, view) = send(&app, "POST", &format!("/api/sessions/{id}/generate"), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["phase"], "generated");
    assert_eq!(backend.calls_of(RequestKind::Summary).len(), 3);
}

#[tokio::test]
async fn oversized_bodies_are_rejected_as_json() {
    let settings = ServerSettings {
        max_upload_bytes: 1024,
        ..ServerSettings::default()
    };
    let backend = Arc::new(ScriptedBackend::canned());
    let app = app_with_settings(Arc::clone(&backend), settings);
    let id = new_session(&app).await;

    let mut body = generate_body();
    body["text"] = json!("x".repeat(8 * 1024));
    let (status, err) = send(&app, "POST", &format!("/api/sessions/{id}/generate"), Some(body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(err["error"].is_string());
    assert!(backend.calls().is_empty());

    let response = app
        .oneshot(multipart_request("big.txt", "text/plain", &[b'a'; 8 * 1024]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let err: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(err["error"].is_string());
}

#[tokio::test]
async fn malformed_json_gets_a_json_error() {
    let app = app_with(Arc::new(ScriptedBackend::canned()));
    let id = new_session(&app).await;
    let (status, err) = send(
        &app,
        "POST",
        &format!("/api/sessions/{id}/select"),
        Some(json!({"emotion": "Joy"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(err["error"].is_string());
}

#[tokio::test]
async fn script_urls_are_refused() {
    let backend = Arc::new(ScriptedBackend::canned());
    let app = app_with(Arc::clone(&backend));
    let id = new_session(&app).await;

    let mut body = generate_body();
    body["url"] = json!("javascript:alert(document.cookie)");
    let (status, err) = send(&app, "POST", &format!("/api/sessions/{id}/generate"), Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["error"], "The newsletter URL must start with http:// or https://.");
    assert!(backend.calls().is_empty());
}
