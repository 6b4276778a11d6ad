//! Voice directory - Maps chat senders to provider-specific voices

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::DomainError;
use crate::value_objects::SpeechProviderKind;

/// Male Hindi voice ("Ayush") on Cartesia
const CARTESIA_AYUSH: &str = "791d5162-d5eb-40f0-8189-f19db44611d8";
/// Female Hindi voice ("Aarti") on Cartesia
const CARTESIA_AARTI: &str = "9cebb910-d4b7-4a4a-85a4-12c79137724c";

const ELEVENLABS_DEFAULT: &str = "JBFqnCBsd6RMkjVDRZzb";

const ELEVENLABS_VOICES: [(&str, &str); 3] = [
    ("Rahul", "k7nOSUCadIEwB6fdJmbw"),
    ("You", "Uyx98Ek4uMNmWN7E28CD"),
    ("Sneha", "1qEiC6qsybMkmnNdVMbK"),
];

const CARTESIA_VOICES: [(&str, &str); 3] = [
    ("Rahul", CARTESIA_AYUSH),
    ("You", CARTESIA_AYUSH),
    ("Sneha", CARTESIA_AARTI),
];

/// Immutable sender-to-voice mapping for a single speech provider
///
/// Every directory carries a non-empty default voice, so resolving a
/// sender never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceDirectory {
    provider: SpeechProviderKind,
    default_voice: String,
    voices: BTreeMap<String, String>,
}

impl VoiceDirectory {
    /// Create a directory from a default voice and sender mappings
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the default voice or any
    /// mapped voice id is blank, or a sender name is blank.
    pub fn new<I, K, V>(
        provider: SpeechProviderKind,
        default_voice: impl Into<String>,
        voices: I,
    ) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let default_voice = default_voice.into();
        if default_voice.trim().is_empty() {
            return Err(DomainError::ValidationError(format!(
                "{provider} voice directory needs a default voice"
            )));
        }

        let mut map = BTreeMap::new();
        for (sender, voice) in voices {
            let sender = sender.into();
            let voice = voice.into();
            if sender.trim().is_empty() || voice.trim().is_empty() {
                return Err(DomainError::ValidationError(format!(
                    "{provider} voice directory has a blank entry: {sender:?} -> {voice:?}"
                )));
            }
            map.insert(sender, voice);
        }

        Ok(Self {
            provider,
            default_voice,
            voices: map,
        })
    }

    /// Built-in ElevenLabs directory (English voices)
    #[must_use]
    pub fn elevenlabs() -> Self {
        Self::builtin(SpeechProviderKind::ElevenLabs, ELEVENLABS_DEFAULT, &ELEVENLABS_VOICES)
    }

    /// Built-in Cartesia directory (Hindi voices)
    #[must_use]
    pub fn cartesia() -> Self {
        Self::builtin(SpeechProviderKind::Cartesia, CARTESIA_AYUSH, &CARTESIA_VOICES)
    }

    /// Built-in directory for the given provider
    #[must_use]
    pub fn builtin_for(provider: SpeechProviderKind) -> Self {
        match provider {
            SpeechProviderKind::ElevenLabs => Self::elevenlabs(),
            SpeechProviderKind::Cartesia => Self::cartesia(),
        }
    }

    fn builtin(provider: SpeechProviderKind, default_voice: &str, voices: &[(&str, &str)]) -> Self {
        Self {
            provider,
            default_voice: default_voice.to_string(),
            voices: voices
                .iter()
                .map(|(s, v)| ((*s).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Return a copy with the given default and sender entries layered on top
    ///
    /// # Errors
    ///
    /// Same validation as [`VoiceDirectory::new`].
    pub fn with_overrides<'a, I>(
        &self,
        default_voice: Option<&str>,
        voices: I,
    ) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut merged = self.voices.clone();
        for (sender, voice) in voices {
            merged.insert(sender.clone(), voice.clone());
        }

        Self::new(
            self.provider,
            default_voice.unwrap_or(&self.default_voice),
            merged,
        )
    }

    /// Resolve the voice for a sender, falling back to the default voice
    #[must_use]
    pub fn resolve_voice(&self, sender: &str) -> &str {
        self.voices
            .get(sender)
            .map_or(self.default_voice.as_str(), String::as_str)
    }

    /// Whether the sender has an explicit mapping
    #[must_use]
    pub fn contains(&self, sender: &str) -> bool {
        self.voices.contains_key(sender)
    }

    /// Provider this directory belongs to
    #[must_use]
    pub const fn provider(&self) -> SpeechProviderKind {
        self.provider
    }

    /// Default voice used for unknown senders
    #[must_use]
    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    /// Explicit sender mappings, ordered by sender
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.voices.iter().map(|(s, v)| (s.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn resolves_known_senders() {
        let directory = VoiceDirectory::elevenlabs();
        assert_eq!(directory.resolve_voice("Rahul"), "k7nOSUCadIEwB6fdJmbw");
        assert_eq!(directory.resolve_voice("Sneha"), "1qEiC6qsybMkmnNdVMbK");
    }

    #[test]
    fn unknown_sender_gets_default_voice() {
        let directory = VoiceDirectory::cartesia();
        assert_eq!(directory.resolve_voice("Priya"), CARTESIA_AYUSH);
        assert!(!directory.contains("Priya"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let directory = VoiceDirectory::elevenlabs();
        assert_eq!(directory.resolve_voice("rahul"), ELEVENLABS_DEFAULT);
    }

    #[test]
    fn cartesia_maps_you_and_rahul_to_same_voice() {
        let directory = VoiceDirectory::cartesia();
        assert_eq!(directory.resolve_voice("You"), directory.resolve_voice("Rahul"));
        assert_eq!(directory.resolve_voice("Sneha"), CARTESIA_AARTI);
    }

    #[test]
    fn repeated_resolution_is_deterministic() {
        let directory = VoiceDirectory::cartesia();
        let first = directory.resolve_voice("Rahul").to_string();
        for _ in 0..10 {
            assert_eq!(directory.resolve_voice("Rahul"), first);
        }
    }

    #[test]
    fn new_rejects_blank_default() {
        let result = VoiceDirectory::new(
            SpeechProviderKind::ElevenLabs,
            "  ",
            Vec::<(String, String)>::new(),
        );
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn new_rejects_blank_voice_entry() {
        let result = VoiceDirectory::new(SpeechProviderKind::Cartesia, "default", [("Rahul", "")]);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_layer_on_top_of_builtin() {
        let overrides: HashMap<String, String> = [
            ("Rahul".to_string(), "custom-voice".to_string()),
            ("Amit".to_string(), "amit-voice".to_string()),
        ]
        .into_iter()
        .collect();

        let directory = VoiceDirectory::elevenlabs()
            .with_overrides(Some("new-default"), &overrides)
            .unwrap();

        assert_eq!(directory.resolve_voice("Rahul"), "custom-voice");
        assert_eq!(directory.resolve_voice("Amit"), "amit-voice");
        assert_eq!(directory.resolve_voice("Sneha"), "1qEiC6qsybMkmnNdVMbK");
        assert_eq!(directory.resolve_voice("Nobody"), "new-default");
    }

    #[test]
    fn builtin_for_matches_provider() {
        assert_eq!(
            VoiceDirectory::builtin_for(SpeechProviderKind::Cartesia).provider(),
            SpeechProviderKind::Cartesia
        );
        assert_eq!(
            VoiceDirectory::builtin_for(SpeechProviderKind::ElevenLabs).default_voice(),
            ELEVENLABS_DEFAULT
        );
    }

    #[test]
    fn entries_are_sorted_by_sender() {
        let directory = VoiceDirectory::elevenlabs();
        let senders: Vec<&str> = directory.entries().map(|(s, _)| s).collect();
        assert_eq!(senders, vec!["Rahul", "Sneha", "You"]);
    }

    proptest! {
        #[test]
        fn unmapped_sender_always_resolves_to_default(sender in "\\PC*") {
            for directory in [VoiceDirectory::elevenlabs(), VoiceDirectory::cartesia()] {
                let voice = directory.resolve_voice(&sender);
                prop_assert!(!voice.is_empty());
                if !directory.contains(&sender) {
                    prop_assert_eq!(voice, directory.default_voice());
                }
            }
        }
    }
}
