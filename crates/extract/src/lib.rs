//! Plain-text extraction for uploaded newsletter documents.
//!
//! [`extract`] is a pure function of the uploaded bytes and the detected
//! [`DocumentKind`]. Failures come back as [`ExtractError`] so the caller can
//! show the cause and carry on with an empty text box.

mod docx;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_MIME: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        // Browsers may append parameters, e.g. "text/plain; charset=utf-8".
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            TEXT_MIME => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Resolve the kind from the declared MIME type, falling back to the file
    /// extension when the type is missing or generic.
    pub fn detect(mime: Option<&str>, file_name: Option<&str>) -> Result<Self, ExtractError> {
        mime.and_then(Self::from_mime)
            .or_else(|| file_name.and_then(Self::from_file_name))
            .ok_or_else(|| {
                ExtractError::Unsupported(
                    mime.or(file_name).unwrap_or("unknown").to_string(),
                )
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("unsupported document type: {0} (expected PDF, DOCX or TXT)")]
    Unsupported(String),

    #[error("Error reading PDF: {0}")]
    Pdf(String),

    #[error("Error reading DOCX: {0}")]
    Docx(String),

    #[error("Error reading text file: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Extract the plain text of a document.
pub fn extract(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
    let text = match kind {
        DocumentKind::Pdf => extract_pdf(bytes)?,
        DocumentKind::Docx => docx::extract_docx(bytes)?,
        DocumentKind::PlainText => extract_plain_text(bytes)?,
    };
    tracing::debug!(?kind, bytes = bytes.len(), chars = text.len(), "extracted document text");
    Ok(text)
}

/// Page texts concatenated in document order. Pages without extractable
/// text contribute nothing.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(pages.concat())
}

fn extract_plain_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = String::from_utf8(bytes.to_vec())?;
    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}
