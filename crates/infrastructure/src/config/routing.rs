//! Classifier and routing policy configuration.

use domain::{RoutingPolicy, SpeechProviderKind, TransliterationPolicy};
use serde::{Deserialize, Serialize};

/// `[classifier]`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// How English loanwords are rendered
    #[serde(default)]
    pub transliteration: TransliterationPolicy,
}

/// Routing policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    /// English to ElevenLabs, everything else to Cartesia
    #[default]
    Hybrid,
    /// Every dialect to `single_provider`
    Single,
}

/// `[routing]`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Policy selector
    #[serde(default)]
    pub policy: RoutingMode,

    /// Provider used by the `single` policy
    #[serde(default)]
    pub single_provider: SpeechProviderKind,
}

impl RoutingConfig {
    /// Resolve into the domain policy
    #[must_use]
    pub const fn policy(&self) -> RoutingPolicy {
        match self.policy {
            RoutingMode::Hybrid => RoutingPolicy::Hybrid,
            RoutingMode::Single => RoutingPolicy::Single {
                provider: self.single_provider,
            },
        }
    }
}
