use axum::{
    http::header,
    response::{IntoResponse, Response},
};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET / — the single-page front end.
pub async fn index() -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        INDEX_HTML,
    )
        .into_response()
}
