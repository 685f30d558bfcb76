use axum::{extract::Multipart, Json};

use bulletin_extract::{extract, DocumentKind};

use crate::error::ApiErr;
use crate::models::ExtractResponse;

/// Multipart field carrying the uploaded document.
const FILE_FIELD: &str = "file";

/// POST /api/extract — plain text from an uploaded PDF, DOCX or TXT file.
///
/// The extracted text is returned for the client to place in its input box;
/// nothing is stored server-side.
pub async fn extract_document(mut multipart: Multipart) -> Result<Json<ExtractResponse>, ApiErr> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let kind = DocumentKind::detect(field.content_type(), file_name.as_deref())?;
        let bytes = field.bytes().await?;
        tracing::info!(
            ?kind,
            file_name = file_name.as_deref().unwrap_or(""),
            bytes = bytes.len(),
            "extracting document"
        );

        // PDF parsing is CPU-bound and may panic on malformed input.
        let text = tokio::task::spawn_blocking(move || extract(&bytes, kind))
            .await
            .map_err(|e| {
                tracing::error!("extraction task failed: {e}");
                ApiErr::unprocessable(format!("Error reading file: {e}"))
            })??;

        return Ok(Json(ExtractResponse {
            kind,
            file_name,
            text,
        }));
    }
    Err(ApiErr::bad_request("missing multipart field \"file\""))
}
