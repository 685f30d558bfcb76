use crate::emotion::Emotion;
use crate::language::Language;

/// A user action attempted without its preconditions.
///
/// The message is user-facing; the presentation layer shows it as an inline
/// warning next to the control that triggered the action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please paste newsletter text or upload a document before generating summaries.")]
    EmptySourceText,

    #[error("Title length must be between {min} and {max} words (got {got}).")]
    TitleLength { got: usize, min: usize, max: usize },

    #[error("The newsletter URL must start with http:// or https://.")]
    InvalidUrl,

    #[error("Summary length must be at least {min} words (got {got}).")]
    SummaryLength { got: usize, min: usize },

    #[error("Please select a summary for translation using the buttons above.")]
    NoSelection,

    #[error("Please select at least one target language.")]
    NoTargetLanguages,

    #[error("No {0} summary has been generated yet.")]
    NotGenerated(Emotion),

    #[error("No {0} translation exists yet.")]
    NotTranslated(Language),
}
