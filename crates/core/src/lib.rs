//! Core types of the newsletter bulletin tool: emotions, languages, summaries,
//! the markdown formatter, word-limit enforcement and the session state
//! machine that the generation driver and the presentation layer share.

pub mod emotion;
pub mod error;
pub mod language;
pub mod session;
pub mod summary;
pub mod words;

pub use emotion::Emotion;
pub use error::ValidationError;
pub use language::{read_more_label, Language};
pub use session::{GenerationParams, Phase, SessionState, SessionView, TranslationPlan};
pub use summary::{format_summary, Summary};
