use bulletin_core::{Emotion, Language};

/// The three kinds of generation call and their fixed parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationTask {
    /// A title of exactly `words` words.
    Title { emotion: Emotion, words: usize },
    /// A summary of strictly fewer than `ceiling` words.
    Summary { emotion: Emotion, ceiling: usize },
    Translation { language: Language },
}

impl GenerationTask {
    pub fn temperature(&self) -> f32 {
        match self {
            Self::Title { .. } => 0.9,
            Self::Summary { .. } => 1.2,
            Self::Translation { .. } => 0.7,
        }
    }

    pub fn system_prompt(&self) -> String {
        match self {
            Self::Title { emotion, words } => format!(
                "You are a title generator. Create a title that:\n\
                 1. Must be EXACTLY {words} words long\n\
                 2. Conveys {}\n\
                 Do not include any other text in your response.",
                emotion.prompt_word()
            ),
            Self::Summary { emotion, ceiling } => format!(
                "You are a newsletter summarizer. Create a summary that:\n\
                 1. Must be LESS THAN {ceiling} words\n\
                 2. Conveys {}\n\
                 3. Is clear and concise\n\
                 Do not include any other text in your response.",
                emotion.prompt_word()
            ),
            Self::Translation { language } => format!(
                "You are a translator. Translate the text to {language} while:\n\
                 1. Preserving all markdown formatting (**, [], etc.)\n\
                 2. Maintaining the original text structure\n\
                 3. Keeping any URLs unchanged"
            ),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::Summary { .. } => "summary",
            Self::Translation { .. } => "translation",
        }
    }
}
