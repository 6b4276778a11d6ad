//! Relay service - Text in, speech out
//!
//! Drives one utterance through the pipeline:
//! 1. Classify the dialect (never fails, falls back to English)
//! 2. Select provider and sender voice
//! 3. Start provider synthesis and hand back the audio stream

use std::{collections::BTreeMap, fmt, time::Instant};

use domain::{ClassificationResult, SpeechProviderKind, SynthesisRequest};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    error::{ApplicationError, SynthesisError},
    ports::{AudioStream, VoiceInfo},
    services::{DialectClassifier, ProviderRouter, RouteDecision},
};

/// Outcome of a relayed utterance
#[derive(Debug)]
pub struct RelayOutcome {
    /// How the text was classified
    pub classification: ClassificationResult,
    /// Where it was routed
    pub decision: RouteDecision,
    /// Audio produced by the selected provider
    pub audio: AudioStream,
}

/// Classification and routing without synthesis
#[derive(Debug, Clone)]
pub struct RelayPlan {
    /// How the text was classified
    pub classification: ClassificationResult,
    /// Where it would be routed
    pub decision: RouteDecision,
}

/// Voices of one provider together with the sender mapping in use
#[derive(Debug, Clone, Serialize)]
pub struct ProviderVoices {
    /// Provider
    pub provider: SpeechProviderKind,
    /// Voice used for unmapped senders
    pub default_voice: String,
    /// Sender to voice id mapping
    pub senders: BTreeMap<String, String>,
    /// Voices available on the provider account
    pub voices: Vec<VoiceInfo>,
}

/// Orchestrates classifier and router for one request at a time
pub struct RelayService {
    classifier: DialectClassifier,
    router: ProviderRouter,
}

impl fmt::Debug for RelayService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayService")
            .field("classifier", &self.classifier)
            .field("router", &self.router)
            .finish()
    }
}

impl RelayService {
    /// Create a relay service
    pub const fn new(classifier: DialectClassifier, router: ProviderRouter) -> Self {
        Self { classifier, router }
    }

    /// The router in use
    pub const fn router(&self) -> &ProviderRouter {
        &self.router
    }

    /// Classify and route without calling a speech provider
    #[instrument(skip(self, request), fields(sender = %request.sender(), text_len = request.text().len()))]
    pub async fn plan(&self, request: &SynthesisRequest) -> RelayPlan {
        let classification = self.classifier.classify_or_fallback(request.text()).await;
        let decision = self
            .router
            .select(classification.dialect, request.sender());

        RelayPlan {
            classification,
            decision,
        }
    }

    /// Run the full pipeline for one utterance
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError` if the selected provider is missing or fails.
    /// Classification problems never surface here.
    #[instrument(skip(self, request), fields(sender = %request.sender(), text_len = request.text().len()))]
    pub async fn relay(&self, request: &SynthesisRequest) -> Result<RelayOutcome, SynthesisError> {
        let start = Instant::now();
        let RelayPlan {
            classification,
            decision,
        } = self.plan(request).await;

        info!(
            dialect = %classification.dialect,
            classification = classification.source.as_str(),
            provider = %decision.provider,
            "Routing utterance"
        );

        let audio = match self
            .router
            .synthesize(&decision, &classification.rendered_text)
            .await
        {
            Ok(audio) => audio,
            Err(e) => {
                warn!(error = %e, provider = %decision.provider, "Synthesis failed");
                return Err(e);
            },
        };

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(elapsed_ms, provider = %decision.provider, "Audio stream started");

        Ok(RelayOutcome {
            classification,
            decision,
            audio,
        })
    }

    /// Voices and sender mappings for every provider the routing policy can reach
    ///
    /// # Errors
    ///
    /// Returns an error if a reachable provider is not registered or its
    /// voice listing fails.
    #[instrument(skip(self))]
    pub async fn voice_catalog(&self) -> Result<Vec<ProviderVoices>, ApplicationError> {
        let mut catalog = Vec::new();

        for kind in self.router.reachable_providers() {
            let port = self
                .router
                .provider(kind)
                .ok_or(ApplicationError::ProviderNotConfigured(kind))?;
            let voices = port.list_voices().await?;

            let (default_voice, senders) = self.router.directory(kind).map_or_else(
                || (String::new(), BTreeMap::new()),
                |directory| {
                    (
                        directory.default_voice().to_string(),
                        directory
                            .entries()
                            .map(|(s, v)| (s.to_string(), v.to_string()))
                            .collect(),
                    )
                },
            );

            catalog.push(ProviderVoices {
                provider: kind,
                default_voice,
                senders,
                voices,
            });
        }

        Ok(catalog)
    }
}
