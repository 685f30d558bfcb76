//! Supported display/translation languages and the localized "Read More"
//! label used by the summary formatter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Turkish,
    Azerbaijani,
    Arabic,
    Russian,
    Portuguese,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Self::English,
        Self::Spanish,
        Self::French,
        Self::German,
        Self::Turkish,
        Self::Azerbaijani,
        Self::Arabic,
        Self::Russian,
        Self::Portuguese,
    ];

    /// English name, also what the translation prompt names as target.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Turkish => "Turkish",
            Self::Azerbaijani => "Azerbaijani",
            Self::Arabic => "Arabic",
            Self::Russian => "Russian",
            Self::Portuguese => "Portuguese",
        }
    }

    pub fn read_more_label(&self) -> &'static str {
        match self {
            Self::English => "Read More",
            Self::Spanish => "Leer Más",
            Self::French => "Lire Plus",
            Self::German => "Mehr Lesen",
            Self::Turkish => "Devamını Oku",
            Self::Azerbaijani => "Daha Ətraflı",
            Self::Arabic => "اقرأ المزيد",
            Self::Russian => "Читать Далее",
            Self::Portuguese => "Ler Mais",
        }
    }
}

/// Label lookup by language name. Unknown names get the English label.
pub fn read_more_label(name: &str) -> &'static str {
    name.parse::<Language>()
        .unwrap_or(Language::English)
        .read_more_label()
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
