//! Speech provider kind - Identifies a speech-synthesis backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported speech-synthesis providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProviderKind {
    /// ElevenLabs multilingual TTS, preferred for pure English
    #[default]
    ElevenLabs,
    /// Cartesia Sonic, preferred for Hindi and code-switched speech
    Cartesia,
}

impl SpeechProviderKind {
    /// Get the display name for this provider
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "ElevenLabs",
            Self::Cartesia => "Cartesia",
        }
    }

    /// Get the config key for this provider
    #[must_use]
    pub const fn config_key(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "elevenlabs",
            Self::Cartesia => "cartesia",
        }
    }

    /// Parse from config string (case-insensitive)
    #[must_use]
    pub fn from_config(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "elevenlabs" | "eleven_labs" => Some(Self::ElevenLabs),
            "cartesia" => Some(Self::Cartesia),
            _ => None,
        }
    }
}

impl fmt::Display for SpeechProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
