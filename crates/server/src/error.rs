use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use bulletin_core::ValidationError;
use bulletin_extract::ExtractError;

/// Unified API error type.
///
/// Produces `{"error": "<message>"}` JSON responses. Validation and
/// extraction failures are user-facing warnings (422); the message is meant
/// to be shown next to the control that triggered the request.
#[derive(Debug)]
pub struct ApiErr {
    status: StatusCode,
    message: String,
}

impl ApiErr {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, msg)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ValidationError> for ApiErr {
    fn from(err: ValidationError) -> Self {
        tracing::warn!("rejected action: {err}");
        Self::unprocessable(err.to_string())
    }
}

impl From<ExtractError> for ApiErr {
    fn from(err: ExtractError) -> Self {
        tracing::warn!("extraction failed: {err}");
        match err {
            ExtractError::Unsupported(_) => {
                Self::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, err.to_string())
            }
            _ => Self::unprocessable(err.to_string()),
        }
    }
}

impl From<MultipartError> for ApiErr {
    fn from(err: MultipartError) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

impl From<JsonRejection> for ApiErr {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({"error": self.message})),
        )
            .into_response()
    }
}
