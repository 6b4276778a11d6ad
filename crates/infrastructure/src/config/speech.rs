//! Speech provider configuration with voice directory overrides.

use std::collections::BTreeMap;

use ai_speech::{CartesiaConfig, ElevenLabsConfig};
use domain::{DomainError, SpeechProviderKind, VoiceDirectory};
use serde::{Deserialize, Serialize};

/// Both speech providers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// ElevenLabs settings
    #[serde(default)]
    pub elevenlabs: ElevenLabsSection,

    /// Cartesia settings
    #[serde(default)]
    pub cartesia: CartesiaSection,
}

/// `[speech.elevenlabs]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElevenLabsSection {
    /// Client settings
    #[serde(flatten)]
    pub client: ElevenLabsConfig,

    /// Voice for unmapped senders (built-in default when unset)
    #[serde(default)]
    pub default_voice: Option<String>,

    /// Extra or replacement sender mappings
    #[serde(default)]
    pub voices: BTreeMap<String, String>,
}

/// `[speech.cartesia]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartesiaSection {
    /// Client settings
    #[serde(flatten)]
    pub client: CartesiaConfig,

    /// Voice for unmapped senders (built-in default when unset)
    #[serde(default)]
    pub default_voice: Option<String>,

    /// Extra or replacement sender mappings
    #[serde(default)]
    pub voices: BTreeMap<String, String>,
}

impl SpeechConfig {
    /// Built-in directory for `provider` with configured overrides applied
    ///
    /// # Errors
    ///
    /// Returns an error if an override is blank.
    pub fn voice_directory(&self, provider: SpeechProviderKind) -> Result<VoiceDirectory, DomainError> {
        let (default_voice, voices) = match provider {
            SpeechProviderKind::ElevenLabs => {
                (self.elevenlabs.default_voice.as_deref(), &self.elevenlabs.voices)
            },
            SpeechProviderKind::Cartesia => {
                (self.cartesia.default_voice.as_deref(), &self.cartesia.voices)
            },
        };

        VoiceDirectory::builtin_for(provider).with_overrides(default_voice, voices)
    }

    /// Whether an API key is configured for `provider`
    #[must_use]
    pub fn has_api_key(&self, provider: SpeechProviderKind) -> bool {
        match provider {
            SpeechProviderKind::ElevenLabs => self.elevenlabs.client.has_api_key(),
            SpeechProviderKind::Cartesia => self.cartesia.client.has_api_key(),
        }
    }

    /// Validate the client settings of `provider`
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem found.
    pub fn validate_provider(&self, provider: SpeechProviderKind) -> Result<(), String> {
        match provider {
            SpeechProviderKind::ElevenLabs => self.elevenlabs.client.validate(),
            SpeechProviderKind::Cartesia => self.cartesia.client.validate(),
        }
    }
}
