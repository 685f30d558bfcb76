use async_trait::async_trait;
use std::time::Duration;

use bulletin_runtime_config::{ApiKey, GenerationSettings};

use crate::backend::{ChatBackend, ChatRequest};
use crate::error::GenerationError;

/// Nucleus sampling is fixed; only temperature varies per task.
const TOP_P: f32 = 1.0;

/// OpenAI-compatible `/chat/completions` backend.
pub struct OpenAiChat {
    client: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
    model: String,
    max_tokens: u32,
    timeout_secs: u64,
}

impl OpenAiChat {
    pub fn new(settings: &GenerationSettings, api_key: ApiKey) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: chat_completions_url(&settings.base_url),
            api_key,
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            timeout_secs: settings.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, request: &ChatRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_text},
            ],
            "temperature": request.temperature,
            "top_p": TOP_P,
            "max_tokens": self.max_tokens,
        })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiChat {
    async fn chat_complete(&self, request: &ChatRequest) -> Result<String, GenerationError> {
        tracing::debug!(
            model = %self.model,
            temperature = request.temperature,
            input_chars = request.user_text.len(),
            "chat completion request"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .header("content-type", "application/json")
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status,
                message: error_message(&body),
            });
        }

        let body: serde_json::Value = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_transport_error(e)
            } else {
                GenerationError::Decode(e.to_string())
            }
        })?;
        let text = extract_chat_text(&body);
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Accepts either an API root (`.../v1`) or a full completions URL.
fn chat_completions_url(base: &str) -> String {
    let base = base.trim();
    if base.to_ascii_lowercase().contains("/chat/completions") {
        return base.to_string();
    }
    format!("{}/chat/completions", base.trim_end_matches('/'))
}

/// First choice's message text. Handles both plain-string content and
/// content-part arrays.
fn extract_chat_text(body: &serde_json::Value) -> String {
    let Some(content) = body
        .get("choices")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
    else {
        return String::new();
    };

    if let Some(text) = content.as_str() {
        return text.to_string();
    }

    let mut parts = Vec::new();
    for block in content.as_array().into_iter().flatten() {
        if let Some(text) = block.get("text").and_then(|v| v.as_str()) {
            if !text.trim().is_empty() {
                parts.push(text.trim().to_string());
            }
        }
    }
    parts.join("\n")
}

/// `error.message` from an OpenAI error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
