//! Routing and transliteration policies
//!
//! Two mutually inconsistent behaviors exist for both concerns; each is a
//! named, explicit choice rather than a blend of the two.

use serde::{Deserialize, Serialize};

use super::{Dialect, SpeechProviderKind};

/// How words of English origin are rendered in the native-script text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransliterationPolicy {
    /// English loanwords stay in Latin script; only Indic words are transliterated
    ///
    /// `"Main late ho gaya."` becomes `"मैं Late हो गया।"`
    #[default]
    PreserveLatinLoanwords,
    /// Every word, loanwords included, is phonetically rendered in the native script
    ///
    /// `"Main late ho gaya."` becomes `"मैं लेट हो गया।"`
    Phonetic,
}

/// How a classified dialect selects a speech provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingPolicy {
    /// English goes to ElevenLabs, every other dialect to Cartesia
    #[default]
    Hybrid,
    /// Every dialect goes to the same provider
    Single {
        /// The provider used for all dialects
        provider: SpeechProviderKind,
    },
}

impl RoutingPolicy {
    /// Pick the provider for a dialect
    #[must_use]
    pub const fn provider_for(&self, dialect: Dialect) -> SpeechProviderKind {
        match self {
            Self::Hybrid => match dialect {
                Dialect::English => SpeechProviderKind::ElevenLabs,
                Dialect::Hindi
                | Dialect::Hinglish
                | Dialect::Bengali
                | Dialect::Gujarati
                | Dialect::Kannada
                | Dialect::Malayalam
                | Dialect::Marathi
                | Dialect::Punjabi
                | Dialect::Tamil
                | Dialect::Telugu
                | Dialect::Mixed => SpeechProviderKind::Cartesia,
            },
            Self::Single { provider } => *provider,
        }
    }

    /// Providers this policy can ever select
    #[must_use]
    pub fn providers(&self) -> Vec<SpeechProviderKind> {
        match self {
            Self::Hybrid => vec![SpeechProviderKind::ElevenLabs, SpeechProviderKind::Cartesia],
            Self::Single { provider } => vec![*provider],
        }
    }
}
