//! Provider router - Picks a speech provider and voice for a classified utterance

use std::{collections::HashMap, fmt, sync::Arc};

use domain::{ClassificationResult, Dialect, RoutingPolicy, SpeechProviderKind, VoiceDirectory};
use tracing::{debug, instrument};

use crate::{
    error::SynthesisError,
    ports::{AudioStream, SpeechSynthesisPort},
};

/// Where an utterance goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    /// Selected provider
    pub provider: SpeechProviderKind,
    /// Voice on that provider
    pub voice_id: String,
}

/// Routes classified text to the matching speech provider
pub struct ProviderRouter {
    policy: RoutingPolicy,
    directories: HashMap<SpeechProviderKind, VoiceDirectory>,
    providers: HashMap<SpeechProviderKind, Arc<dyn SpeechSynthesisPort>>,
}

impl fmt::Debug for ProviderRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRouter")
            .field("policy", &self.policy)
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ProviderRouter {
    /// Create a router with the built-in voice directories and no providers
    pub fn new(policy: RoutingPolicy) -> Self {
        let directories = [SpeechProviderKind::ElevenLabs, SpeechProviderKind::Cartesia]
            .into_iter()
            .map(|kind| (kind, VoiceDirectory::builtin_for(kind)))
            .collect();

        Self {
            policy,
            directories,
            providers: HashMap::new(),
        }
    }

    /// Register a provider handle, keyed by the provider it reports
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn SpeechSynthesisPort>) -> Self {
        self.providers.insert(provider.provider(), provider);
        self
    }

    /// Replace the voice directory of the directory's provider
    #[must_use]
    pub fn with_directory(mut self, directory: VoiceDirectory) -> Self {
        self.directories.insert(directory.provider(), directory);
        self
    }

    /// Active routing policy
    pub const fn policy(&self) -> RoutingPolicy {
        self.policy
    }

    /// Voice directory for a provider
    pub fn directory(&self, provider: SpeechProviderKind) -> Option<&VoiceDirectory> {
        self.directories.get(&provider)
    }

    /// Registered provider handle
    pub fn provider(&self, provider: SpeechProviderKind) -> Option<&Arc<dyn SpeechSynthesisPort>> {
        self.providers.get(&provider)
    }

    /// Providers the policy can select, in a stable order
    pub fn reachable_providers(&self) -> Vec<SpeechProviderKind> {
        self.policy.providers()
    }

    /// Pick the provider and voice without performing I/O
    pub fn select(&self, dialect: Dialect, sender: &str) -> RouteDecision {
        let provider = self.policy.provider_for(dialect);
        let voice_id = self.directories.get(&provider).map_or_else(
            || VoiceDirectory::builtin_for(provider).resolve_voice(sender).to_string(),
            |directory| directory.resolve_voice(sender).to_string(),
        );

        RouteDecision { provider, voice_id }
    }

    /// Select a provider and start synthesis of the rendered text
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError` if the selected provider has no registered
    /// handle or the provider call fails.
    #[instrument(skip(self, classification), fields(dialect = %classification.dialect))]
    pub async fn route(
        &self,
        classification: &ClassificationResult,
        sender: &str,
    ) -> Result<AudioStream, SynthesisError> {
        let decision = self.select(classification.dialect, sender);
        self.synthesize(&decision, &classification.rendered_text)
            .await
    }

    /// Run synthesis for an already-made decision
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError` if the provider is missing or fails.
    pub async fn synthesize(
        &self,
        decision: &RouteDecision,
        text: &str,
    ) -> Result<AudioStream, SynthesisError> {
        let port = self
            .providers
            .get(&decision.provider)
            .ok_or(SynthesisError::ProviderNotConfigured(decision.provider))?;

        debug!(
            provider = %decision.provider,
            voice_id = %decision.voice_id,
            text_len = text.len(),
            "Routing to speech provider"
        );

        port.synthesize(text, &decision.voice_id).await
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::{ApplicationError, ports::MockSpeechSynthesisPort};

    const CARTESIA_AYUSH: &str = "791d5162-d5eb-40f0-8189-f19db44611d8";

    fn mock_provider(kind: SpeechProviderKind, expected_voice: &'static str) -> MockSpeechSynthesisPort {
        let mut mock = MockSpeechSynthesisPort::new();
        mock.expect_provider().return_const(kind);
        mock.expect_synthesize()
            .withf(move |_, voice_id| voice_id.starts_with(expected_voice))
            .returning(move |_, _| {
                Ok(AudioStream::from_chunks(kind, vec![Bytes::from_static(b"ID3")]))
            });
        mock
    }

    #[test]
    fn hybrid_select_english() {
        let router = ProviderRouter::new(RoutingPolicy::Hybrid);
        let decision = router.select(Dialect::English, "Rahul");
        assert_eq!(decision.provider, SpeechProviderKind::ElevenLabs);
        assert_eq!(decision.voice_id, "k7nOSUCadIEwB6fdJmbw");
    }

    #[test]
    fn hybrid_select_non_english() {
        let router = ProviderRouter::new(RoutingPolicy::Hybrid);
        for dialect in Dialect::ALL.into_iter().filter(|d| !d.is_english()) {
            let decision = router.select(dialect, "Rahul");
            assert_eq!(decision.provider, SpeechProviderKind::Cartesia);
            assert_eq!(decision.voice_id, CARTESIA_AYUSH);
        }
    }

    #[test]
    fn unknown_sender_uses_default_voice() {
        let router = ProviderRouter::new(RoutingPolicy::Hybrid);
        let decision = router.select(Dialect::English, "Stranger");
        assert_eq!(decision.voice_id, "JBFqnCBsd6RMkjVDRZzb");
    }

    #[test]
    fn single_policy_ignores_dialect() {
        let router = ProviderRouter::new(RoutingPolicy::Single {
            provider: SpeechProviderKind::ElevenLabs,
        });
        assert_eq!(
            router.select(Dialect::Hinglish, "Sneha").provider,
            SpeechProviderKind::ElevenLabs
        );
        assert_eq!(router.reachable_providers(), vec![SpeechProviderKind::ElevenLabs]);
    }

    #[test]
    fn custom_directory_replaces_builtin() {
        let directory =
            VoiceDirectory::new(SpeechProviderKind::Cartesia, "custom-default", [("Amit", "amit-voice")])
                .unwrap();
        let router = ProviderRouter::new(RoutingPolicy::Hybrid).with_directory(directory);

        assert_eq!(router.select(Dialect::Hindi, "Amit").voice_id, "amit-voice");
        assert_eq!(router.select(Dialect::Hindi, "Rahul").voice_id, "custom-default");
    }

    #[tokio::test]
    async fn route_hinglish_to_cartesia_with_sender_voice() {
        let router = ProviderRouter::new(RoutingPolicy::Hybrid)
            .with_provider(Arc::new(mock_provider(SpeechProviderKind::Cartesia, CARTESIA_AYUSH)));

        let classification =
            ClassificationResult::from_model(Dialect::Hinglish, "सही है, Done करते हैं।");
        let audio = router.route(&classification, "Rahul").await.unwrap();

        assert_eq!(audio.provider, SpeechProviderKind::Cartesia);
        assert_eq!(audio.collect_bytes().await.unwrap(), b"ID3");
    }

    #[tokio::test]
    async fn route_passes_rendered_text() {
        let mut mock = MockSpeechSynthesisPort::new();
        mock.expect_provider().return_const(SpeechProviderKind::ElevenLabs);
        mock.expect_synthesize()
            .withf(|text, _| text.starts_with("Hello there"))
            .times(1)
            .returning(|_, _| Ok(AudioStream::from_chunks(SpeechProviderKind::ElevenLabs, vec![])));

        let router = ProviderRouter::new(RoutingPolicy::Hybrid).with_provider(Arc::new(mock));
        let classification = ClassificationResult::fallback("Hello there");
        assert!(router.route(&classification, "You").await.is_ok());
    }

    #[tokio::test]
    async fn missing_provider_is_an_error() {
        let router = ProviderRouter::new(RoutingPolicy::Hybrid)
            .with_provider(Arc::new(mock_provider(SpeechProviderKind::Cartesia, CARTESIA_AYUSH)));

        let classification = ClassificationResult::from_model(Dialect::English, "Hi");
        let err = router.route(&classification, "Rahul").await.unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::ProviderNotConfigured(SpeechProviderKind::ElevenLabs)
        ));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let mut mock = MockSpeechSynthesisPort::new();
        mock.expect_provider().return_const(SpeechProviderKind::Cartesia);
        mock.expect_synthesize().returning(|_, _| {
            Err(ApplicationError::Synthesis {
                provider: SpeechProviderKind::Cartesia,
                detail: "Invalid API key".to_string(),
            })
        });

        let router = ProviderRouter::new(RoutingPolicy::Hybrid).with_provider(Arc::new(mock));
        let classification = ClassificationResult::from_model(Dialect::Hindi, "नमस्ते");
        let err = router.route(&classification, "Sneha").await.unwrap_err();

        assert!(err.to_string().contains("Invalid API key"));
    }
}
