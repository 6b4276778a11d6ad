//! Dialect - Detected language/register of a chat utterance

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of dialect labels the classifier may produce
///
/// [`Dialect::parse`] rejects labels outside this set; the classifier folds
/// those into [`Dialect::Mixed`], so every routing decision is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Pure English
    #[default]
    English,
    /// Hindi written in Devanagari or romanized
    Hindi,
    /// Code-switched Hindi and English
    Hinglish,
    Bengali,
    Gujarati,
    Kannada,
    Malayalam,
    Marathi,
    Punjabi,
    Tamil,
    Telugu,
    /// Any other mix of languages, or an unrecognized label
    Mixed,
}

impl Dialect {
    /// Every dialect, in prompt order
    pub const ALL: [Self; 12] = [
        Self::English,
        Self::Hindi,
        Self::Hinglish,
        Self::Bengali,
        Self::Gujarati,
        Self::Kannada,
        Self::Malayalam,
        Self::Marathi,
        Self::Punjabi,
        Self::Tamil,
        Self::Telugu,
        Self::Mixed,
    ];

    /// Wire label used in prompts and model responses
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Hindi => "hindi",
            Self::Hinglish => "hinglish",
            Self::Bengali => "bengali",
            Self::Gujarati => "gujarati",
            Self::Kannada => "kannada",
            Self::Malayalam => "malayalam",
            Self::Marathi => "marathi",
            Self::Punjabi => "punjabi",
            Self::Tamil => "tamil",
            Self::Telugu => "telugu",
            Self::Mixed => "mixed",
        }
    }

    /// Script the dialect is natively written in
    #[must_use]
    pub const fn native_script(&self) -> &'static str {
        match self {
            Self::English => "Latin",
            Self::Hindi | Self::Hinglish | Self::Marathi | Self::Mixed => "Devanagari",
            Self::Bengali => "Bengali",
            Self::Gujarati => "Gujarati",
            Self::Kannada => "Kannada",
            Self::Malayalam => "Malayalam",
            Self::Punjabi => "Gurmukhi",
            Self::Tamil => "Tamil",
            Self::Telugu => "Telugu",
        }
    }

    /// Parse a model-produced label (case-insensitive, surrounding whitespace ignored)
    ///
    /// Returns `None` for labels outside the closed set.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|d| d.label() == normalized)
    }

    /// Whether this is the English dialect
    #[must_use]
    pub const fn is_english(&self) -> bool {
        matches!(self, Self::English)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
