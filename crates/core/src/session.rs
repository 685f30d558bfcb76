//! Session-scoped orchestration state.
//!
//! [`SessionState`] owns everything a user builds up during one visit: the
//! generated summaries per emotion, the user's edits, the single summary
//! picked for translation and the resulting translations. It only exposes
//! named transitions; the async driver in `bulletin-summary` performs the
//! remote calls and feeds their results back through
//! [`SessionState::apply_generation`] and [`SessionState::apply_translations`].
//!
//! Phases: `Idle -> Generated -> Translated`, where both later phases are
//! re-entrant. Work in flight is not a stored phase: the driver holds the
//! session exclusively until a batch resolves, and a dropped batch leaves the
//! state exactly as it was.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use crate::emotion::Emotion;
use crate::error::ValidationError;
use crate::language::Language;
use crate::summary::{format_summary, Summary};

pub const TITLE_LENGTH_RANGE: RangeInclusive<usize> = 1..=10;
pub const DEFAULT_TITLE_LENGTH: usize = 4;
/// Word ceilings offered to the user ("<30 words", ...).
pub const SUMMARY_LENGTH_CHOICES: [usize; 3] = [30, 50, 100];
pub const DEFAULT_SUMMARY_LENGTH: usize = 30;
/// A ceiling of 1 would leave no room for any word.
pub const MIN_SUMMARY_LENGTH: usize = 2;

/// Inputs of one "Generate" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_summary_length")]
    pub summary_length: usize,
    #[serde(default = "default_title_length")]
    pub title_length: usize,
    #[serde(default)]
    pub language: Language,
}

impl GenerationParams {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: String::new(),
            summary_length: DEFAULT_SUMMARY_LENGTH,
            title_length: DEFAULT_TITLE_LENGTH,
            language: Language::English,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptySourceText);
        }
        if !TITLE_LENGTH_RANGE.contains(&self.title_length) {
            return Err(ValidationError::TitleLength {
                got: self.title_length,
                min: *TITLE_LENGTH_RANGE.start(),
                max: *TITLE_LENGTH_RANGE.end(),
            });
        }
        if self.summary_length < MIN_SUMMARY_LENGTH {
            return Err(ValidationError::SummaryLength {
                got: self.summary_length,
                min: MIN_SUMMARY_LENGTH,
            });
        }
        if !is_web_url(self.source_url()) {
            return Err(ValidationError::InvalidUrl);
        }
        Ok(())
    }

    /// The source URL with surrounding whitespace removed.
    pub fn source_url(&self) -> &str {
        self.url.trim()
    }
}

/// Empty, or an absolute `http`/`https` URL. Anything else would become a
/// live link in the rendered panel.
fn is_web_url(url: &str) -> bool {
    if url.is_empty() {
        return true;
    }
    let lower = url.to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lower.len() > scheme.len() && lower.starts_with(scheme))
}

fn default_summary_length() -> usize {
    DEFAULT_SUMMARY_LENGTH
}
fn default_title_length() -> usize {
    DEFAULT_TITLE_LENGTH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Generated,
    Translated,
}

/// What a translate action will send out: the resolved source text and the
/// target languages in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPlan {
    pub emotion: Emotion,
    pub source: String,
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    phase: Phase,
    generate_clicked: bool,
    language: Language,
    summaries: BTreeMap<Emotion, Summary>,
    edited: BTreeMap<Emotion, String>,
    selected_for_translation: Option<Emotion>,
    target_languages: BTreeSet<Language>,
    translations: BTreeMap<Language, String>,
    edited_translations: BTreeMap<Language, String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generate_clicked(&self) -> bool {
        self.generate_clicked
    }

    /// Primary language of the most recent generation.
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn summaries(&self) -> &BTreeMap<Emotion, Summary> {
        &self.summaries
    }

    pub fn summary(&self, emotion: Emotion) -> Option<&Summary> {
        self.summaries.get(&emotion)
    }

    pub fn edited(&self, emotion: Emotion) -> Option<&str> {
        self.edited.get(&emotion).map(String::as_str)
    }

    pub fn selected_for_translation(&self) -> Option<Emotion> {
        self.selected_for_translation
    }

    pub fn target_languages(&self) -> &BTreeSet<Language> {
        &self.target_languages
    }

    pub fn translations(&self) -> &BTreeMap<Language, String> {
        &self.translations
    }

    /// Replace all summaries with a freshly generated batch.
    ///
    /// Nothing from the previous batch is carried over. User edits live in
    /// their own map and stay in place until edited again or reset.
    pub fn apply_generation(&mut self, language: Language, summaries: BTreeMap<Emotion, Summary>) {
        self.summaries = summaries;
        self.language = language;
        self.generate_clicked = true;
        self.target_languages.clear();
        if let Some(selected) = self.selected_for_translation {
            if !self.summaries.contains_key(&selected) {
                self.selected_for_translation = None;
            }
        }
        self.phase = Phase::Generated;
    }

    /// Formatted markdown for one emotion's generated summary.
    pub fn formatted(&self, emotion: Emotion) -> Option<String> {
        self.summaries
            .get(&emotion)
            .map(|summary| format_summary(summary, self.language))
    }

    /// Text shown in (and copied from) an emotion's panel.
    pub fn panel_text(&self, emotion: Emotion) -> Option<String> {
        match self.edited.get(&emotion) {
            Some(edited) if self.summaries.contains_key(&emotion) => Some(edited.clone()),
            _ => self.formatted(emotion),
        }
    }

    pub fn select_for_translation(
        &mut self,
        emotion: Emotion,
        current_text: Option<String>,
    ) -> Result<(), ValidationError> {
        let formatted = self
            .formatted(emotion)
            .ok_or(ValidationError::NotGenerated(emotion))?;
        match current_text {
            Some(text) => {
                self.edited.insert(emotion, text);
            }
            None => {
                self.edited.entry(emotion).or_insert(formatted);
            }
        }
        self.selected_for_translation = Some(emotion);
        Ok(())
    }

    pub fn edit_summary(&mut self, emotion: Emotion, text: String) -> Result<(), ValidationError> {
        if !self.summaries.contains_key(&emotion) {
            return Err(ValidationError::NotGenerated(emotion));
        }
        self.edited.insert(emotion, text);
        Ok(())
    }

    /// Drop the user's edit so the panel shows the generated summary again.
    pub fn reset_edit(&mut self, emotion: Emotion) -> Result<(), ValidationError> {
        if !self.summaries.contains_key(&emotion) {
            return Err(ValidationError::NotGenerated(emotion));
        }
        self.edited.remove(&emotion);
        Ok(())
    }

    /// Resolve the source text and target list for a translate action.
    pub fn plan_translation(
        &self,
        languages: &[Language],
    ) -> Result<TranslationPlan, ValidationError> {
        let emotion = self
            .selected_for_translation
            .ok_or(ValidationError::NoSelection)?;
        if languages.is_empty() {
            return Err(ValidationError::NoTargetLanguages);
        }
        let source = match self.edited.get(&emotion) {
            Some(edited) => edited.clone(),
            None => self
                .formatted(emotion)
                .ok_or(ValidationError::NotGenerated(emotion))?,
        };
        let languages = languages
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Ok(TranslationPlan {
            emotion,
            source,
            languages,
        })
    }

    /// Replace all translations with the batch produced for `plan`.
    pub fn apply_translations(
        &mut self,
        plan: &TranslationPlan,
        translations: BTreeMap<Language, String>,
    ) {
        self.target_languages = plan.languages.iter().copied().collect();
        self.translations = translations;
        self.edited_translations.clear();
        self.phase = Phase::Translated;
    }

    pub fn edit_translation(
        &mut self,
        language: Language,
        text: String,
    ) -> Result<(), ValidationError> {
        if !self.translations.contains_key(&language) {
            return Err(ValidationError::NotTranslated(language));
        }
        self.edited_translations.insert(language, text);
        Ok(())
    }

    /// Text shown in (and copied from) a translation panel.
    pub fn translation_text(&self, language: Language) -> Option<&str> {
        self.edited_translations
            .get(&language)
            .or_else(|| self.translations.get(&language))
            .map(String::as_str)
    }

    /// Read-only snapshot for the presentation layer.
    pub fn view(&self) -> SessionView {
        let panels = if self.generate_clicked {
            Emotion::ALL
                .into_iter()
                .filter_map(|emotion| {
                    let summary = self.summaries.get(&emotion)?.clone();
                    Some(SummaryPanel {
                        emotion,
                        emoji: emotion.emoji().to_string(),
                        formatted: format_summary(&summary, self.language),
                        text: self.panel_text(emotion).unwrap_or_default(),
                        edited: self.edited.contains_key(&emotion),
                        read_more_label: self.language.read_more_label().to_string(),
                        summary,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };
        let translations = self
            .translations
            .keys()
            .map(|&language| TranslationPanel {
                language,
                text: self.translation_text(language).unwrap_or_default().to_string(),
                edited: self.edited_translations.contains_key(&language),
            })
            .collect();
        SessionView {
            phase: self.phase,
            generate_clicked: self.generate_clicked,
            language: self.language,
            selected_for_translation: self.selected_for_translation,
            panels,
            target_languages: self.target_languages.iter().copied().collect(),
            translations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPanel {
    pub emotion: Emotion,
    pub emoji: String,
    pub summary: Summary,
    pub formatted: String,
    /// Edited text if the user changed the panel, otherwise `formatted`.
    pub text: String,
    pub edited: bool,
    pub read_more_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPanel {
    pub language: Language,
    pub text: String,
    pub edited: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: Phase,
    pub generate_clicked: bool,
    pub language: Language,
    pub selected_for_translation: Option<Emotion>,
    pub panels: Vec<SummaryPanel>,
    pub target_languages: Vec<Language>,
    pub translations: Vec<TranslationPanel>,
}
