//! Scripted [`ChatBackend`] for exercising the orchestrator without a
//! network.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::backend::{ChatBackend, ChatRequest};
use crate::error::GenerationError;

type Responder = Box<dyn Fn(&ChatRequest) -> Result<String, GenerationError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Title,
    Summary,
    Translation,
}

impl RequestKind {
    pub fn of(request: &ChatRequest) -> Self {
        if request.system_prompt.starts_with("You are a title generator") {
            Self::Title
        } else if request.system_prompt.starts_with("You are a translator") {
            Self::Translation
        } else {
            Self::Summary
        }
    }
}

/// Target language named in a translation prompt.
pub fn translation_target(request: &ChatRequest) -> Option<&str> {
    request
        .system_prompt
        .strip_prefix("You are a translator. Translate the text to ")?
        .split(" while")
        .next()
}

/// Emotion word named in a title/summary prompt ("excitement", ...).
pub fn prompt_emotion(request: &ChatRequest) -> Option<&str> {
    let rest = request.system_prompt.split("Conveys ").nth(1)?;
    rest.split('\n').next()
}

pub struct ScriptedBackend {
    calls: Mutex<Vec<ChatRequest>>,
    respond: Responder,
}

impl ScriptedBackend {
    pub fn new(
        respond: impl Fn(&ChatRequest) -> Result<String, GenerationError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// Plausible canned output for every request kind. Translations echo
    /// their source prefixed with the target language.
    pub fn canned() -> Self {
        Self::new(canned_response)
    }

    /// Like [`ScriptedBackend::canned`] but every request matching
    /// `fails` returns `error`.
    pub fn failing_when(
        fails: impl Fn(&ChatRequest) -> bool + Send + Sync + 'static,
        error: GenerationError,
    ) -> Self {
        Self::new(move |request| {
            if fails(request) {
                Err(error.clone())
            } else {
                canned_response(request)
            }
        })
    }

    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn calls_of(&self, kind: RequestKind) -> Vec<ChatRequest> {
        self.calls()
            .into_iter()
            .filter(|request| RequestKind::of(request) == kind)
            .collect()
    }
}

pub fn canned_response(request: &ChatRequest) -> Result<String, GenerationError> {
    let emotion = prompt_emotion(request).unwrap_or("news");
    Ok(match RequestKind::of(request) {
        RequestKind::Title => format!("**Funding** Round Sparks {emotion} Across Markets"),
        RequestKind::Summary => format!(
            "Company X raised ten million dollars, a development readers may find full of {emotion}."
        ),
        RequestKind::Translation => format!(
            "[{}] {}",
            translation_target(request).unwrap_or("?"),
            request.user_text
        ),
    })
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn chat_complete(&self, request: &ChatRequest) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());
        (self.respond)(request)
    }
}
