use std::sync::Arc;

use bulletin_core::words::{enforce_word_ceiling, enforce_word_limit};
use bulletin_core::{Emotion, Language};

use crate::backend::{ChatBackend, ChatRequest};
use crate::error::GenerationError;
use crate::prompts::GenerationTask;

/// Runs generation tasks against a [`ChatBackend`] and applies the local
/// word limits to what comes back.
#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn ChatBackend>,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    pub async fn generate(&self, task: GenerationTask, text: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            system_prompt: task.system_prompt(),
            user_text: text.to_string(),
            temperature: task.temperature(),
        };
        tracing::debug!(task = task.label(), input_chars = text.len(), "generation task");
        let raw = self.backend.chat_complete(&request).await?;
        Ok(match task {
            GenerationTask::Title { words, .. } => enforce_word_limit(raw.trim(), words),
            GenerationTask::Summary { ceiling, .. } => enforce_word_ceiling(&raw, ceiling),
            GenerationTask::Translation { .. } => raw,
        })
    }

    pub async fn title(
        &self,
        text: &str,
        emotion: Emotion,
        words: usize,
    ) -> Result<String, GenerationError> {
        self.generate(GenerationTask::Title { emotion, words }, text)
            .await
    }

    pub async fn summary(
        &self,
        text: &str,
        emotion: Emotion,
        ceiling: usize,
    ) -> Result<String, GenerationError> {
        self.generate(GenerationTask::Summary { emotion, ceiling }, text)
            .await
    }

    pub async fn translate(&self, text: &str, language: Language) -> Result<String, GenerationError> {
        self.generate(GenerationTask::Translation { language }, text)
            .await
    }
}
