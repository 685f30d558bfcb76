use async_trait::async_trait;

use crate::error::GenerationError;

/// One chat-completion call: a system directive plus the user's text.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_prompt: String,
    pub user_text: String,
    pub temperature: f32,
}

/// The remote text-generation service.
///
/// Model, sampling width and output budget are fixed per backend; only the
/// prompt pair and temperature vary per call.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat_complete(&self, request: &ChatRequest) -> Result<String, GenerationError>;
}
