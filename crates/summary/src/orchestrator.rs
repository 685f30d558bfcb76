//! Async driver for the session state machine.
//!
//! Every remote call of a batch runs concurrently inside the caller's future
//! and the session is only written once the whole batch has resolved.
//! Dropping the future (client went away) cancels the in-flight calls and
//! leaves the session untouched.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use bulletin_core::{
    Emotion, GenerationParams, Language, SessionState, Summary, ValidationError,
};

use crate::client::GenerationClient;
use crate::error::GenerationError;

/// The unit of work a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureScope {
    Title { emotion: Emotion },
    Summary { emotion: Emotion },
    Translation { language: Language },
}

/// A generation call that failed and was replaced by an inline error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub scope: FailureScope,
    pub message: String,
}

/// Failures of one batch; empty when everything succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub failures: Vec<Failure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Text for a slot: the generated string, or `Error: <cause>`.
    fn settle(&mut self, scope: FailureScope, result: Result<String, GenerationError>) -> String {
        match result {
            Ok(text) => text,
            Err(err) => {
                warn!(?scope, "generation failed: {err}");
                let message = err.to_string();
                let inline = inline_error(&message);
                self.failures.push(Failure { scope, message });
                inline
            }
        }
    }
}

/// The string shown in place of text that could not be generated.
pub fn inline_error(cause: &str) -> String {
    format!("Error: {cause}")
}

#[derive(Clone)]
pub struct Orchestrator {
    client: GenerationClient,
}

impl Orchestrator {
    pub fn new(client: GenerationClient) -> Self {
        Self { client }
    }

    /// Generate all three emotion summaries and replace the session's
    /// summaries with them.
    ///
    /// Invalid parameters leave the session untouched. Individual call
    /// failures do not: the affected title or content slot holds an inline
    /// error and the other emotions are complete.
    pub async fn generate(
        &self,
        state: &mut SessionState,
        params: &GenerationParams,
    ) -> Result<BatchReport, ValidationError> {
        params.validate()?;
        info!(
            language = %params.language,
            summary_length = params.summary_length,
            title_length = params.title_length,
            input_chars = params.text.len(),
            "generating summaries"
        );

        let results = join_all(
            Emotion::ALL
                .into_iter()
                .map(|emotion| self.generate_emotion(emotion, params)),
        )
        .await;

        let mut report = BatchReport::default();
        let mut summaries = BTreeMap::new();
        for (emotion, title, content) in results {
            let title = report.settle(FailureScope::Title { emotion }, title);
            let content = report.settle(FailureScope::Summary { emotion }, content);
            summaries.insert(
                emotion,
                Summary::new(title, content, params.source_url()),
            );
        }

        state.apply_generation(params.language, summaries);
        info!(failures = report.failures.len(), "summaries generated");
        Ok(report)
    }

    /// Title and content for one emotion, translated into the primary
    /// language when it is not English. Failed parts are not translated.
    async fn generate_emotion(
        &self,
        emotion: Emotion,
        params: &GenerationParams,
    ) -> (
        Emotion,
        Result<String, GenerationError>,
        Result<String, GenerationError>,
    ) {
        let (title, content) = tokio::join!(
            self.client.title(&params.text, emotion, params.title_length),
            self.client
                .summary(&params.text, emotion, params.summary_length),
        );

        if params.language == Language::English {
            return (emotion, title, content);
        }

        let (title, content) = tokio::join!(
            self.translate_part(title, params.language),
            self.translate_part(content, params.language),
        );
        (emotion, title, content)
    }

    async fn translate_part(
        &self,
        part: Result<String, GenerationError>,
        language: Language,
    ) -> Result<String, GenerationError> {
        self.client.translate(&part?, language).await
    }

    /// Translate the selected summary into every requested language and
    /// replace the session's translations with the results.
    ///
    /// Missing selection or an empty language list is rejected before any
    /// call is made, leaving existing translations as they were.
    pub async fn translate(
        &self,
        state: &mut SessionState,
        languages: &[Language],
    ) -> Result<BatchReport, ValidationError> {
        let plan = state.plan_translation(languages)?;
        info!(
            emotion = %plan.emotion,
            languages = plan.languages.len(),
            "translating summary"
        );

        let source = plan.source.as_str();
        let results = join_all(plan.languages.iter().map(|&language| async move {
            (language, self.client.translate(source, language).await)
        }))
        .await;

        let mut report = BatchReport::default();
        let translations = results
            .into_iter()
            .map(|(language, result)| {
                (
                    language,
                    report.settle(FailureScope::Translation { language }, result),
                )
            })
            .collect();

        state.apply_translations(&plan, translations);
        Ok(report)
    }
}
