//! Request and response bodies for the JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bulletin_core::session::{
    DEFAULT_SUMMARY_LENGTH, DEFAULT_TITLE_LENGTH, SUMMARY_LENGTH_CHOICES, TITLE_LENGTH_RANGE,
};
use bulletin_core::{Emotion, Language, SessionView};
use bulletin_extract::DocumentKind;
use bulletin_summary::Failure;

use crate::store::SessionHandle;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmotionOption {
    pub emotion: Emotion,
    pub emoji: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageOption {
    pub language: Language,
    pub read_more_label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TitleLengthOption {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

/// Everything the page needs to render its controls.
#[derive(Debug, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub emotions: Vec<EmotionOption>,
    pub languages: Vec<LanguageOption>,
    pub summary_lengths: Vec<usize>,
    pub default_summary_length: usize,
    pub title_length: TitleLengthOption,
    pub max_upload_bytes: usize,
}

impl OptionsResponse {
    pub fn new(max_upload_bytes: usize) -> Self {
        Self {
            emotions: Emotion::ALL
                .into_iter()
                .map(|emotion| EmotionOption {
                    emotion,
                    emoji: emotion.emoji().to_string(),
                })
                .collect(),
            languages: Language::ALL
                .into_iter()
                .map(|language| LanguageOption {
                    language,
                    read_more_label: language.read_more_label().to_string(),
                })
                .collect(),
            summary_lengths: SUMMARY_LENGTH_CHOICES.to_vec(),
            default_summary_length: DEFAULT_SUMMARY_LENGTH,
            title_length: TitleLengthOption {
                min: *TITLE_LENGTH_RANGE.start(),
                max: *TITLE_LENGTH_RANGE.end(),
                default: DEFAULT_TITLE_LENGTH,
            },
            max_upload_bytes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub kind: DocumentKind,
    pub file_name: Option<String>,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectRequest {
    pub emotion: Emotion,
    /// Panel text as currently shown, including unsaved edits.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EditRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub languages: Vec<Language>,
}

/// Session snapshot plus the failures of the action that produced it.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub view: SessionView,
    #[serde(default)]
    pub failures: Vec<Failure>,
}

impl SessionResponse {
    pub fn new(handle: &SessionHandle, view: SessionView, failures: Vec<Failure>) -> Self {
        Self {
            session_id: handle.id,
            created_at: handle.created_at,
            view,
            failures,
        }
    }
}
