use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tone a summary is written in. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Excitement,
    Interesting,
    Confusion,
}

impl Emotion {
    pub const ALL: [Emotion; 3] = [Self::Excitement, Self::Interesting, Self::Confusion];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excitement => "Excitement",
            Self::Interesting => "Interesting",
            Self::Confusion => "Confusion",
        }
    }

    /// Word used inside generation prompts ("Conveys excitement").
    pub fn prompt_word(&self) -> &'static str {
        match self {
            Self::Excitement => "excitement",
            Self::Interesting => "interesting",
            Self::Confusion => "confusion",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Excitement => "😊",
            Self::Interesting => "🤔",
            Self::Confusion => "😕",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion: {0}")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}
