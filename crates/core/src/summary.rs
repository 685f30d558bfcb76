use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Generated (title, content, source link) for one emotion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub title: String,
    pub content: String,
    /// Source article link; empty means absent.
    #[serde(default)]
    pub url: String,
}

impl Summary {
    pub fn new(title: impl Into<String>, content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: url.into(),
        }
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Render a summary as markdown: bold title, blank line, content, and a
/// localized "Read More" link when the summary carries a URL.
///
/// Emphasis markers already present in the title are dropped so the result
/// always has exactly one bold pair around the title.
pub fn format_summary(summary: &Summary, language: Language) -> String {
    let clean_title = summary.title.replace('*', "");
    let mut formatted = format!("**{clean_title}**\n\n{}", summary.content);
    if summary.has_url() {
        formatted.push_str(&format!(
            "\n\n[{}]({})",
            language.read_more_label(),
            summary.url
        ));
    }
    formatted
}
