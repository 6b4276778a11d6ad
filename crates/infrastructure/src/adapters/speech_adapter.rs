//! Speech adapter - Implements SpeechSynthesisPort using ai_speech providers

use std::sync::Arc;

use ai_speech::{
    CartesiaConfig, CartesiaProvider, ElevenLabsConfig, ElevenLabsProvider, SpeechError,
    TextToSpeech,
};
use application::{
    error::ApplicationError,
    ports::{AudioStream, SpeechSynthesisPort, VoiceInfo},
};
use async_trait::async_trait;
use domain::SpeechProviderKind;
use futures::{StreamExt, TryStreamExt};
use tracing::{debug, instrument};

/// Adapter from an `ai_speech` provider to the application speech port
pub struct SpeechAdapter {
    provider: Arc<dyn TextToSpeech>,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("provider", &self.provider.provider_kind())
            .field("model", &self.provider.model_name())
            .finish()
    }
}

impl SpeechAdapter {
    /// Wrap a provider
    pub fn new(provider: Arc<dyn TextToSpeech>) -> Self {
        Self { provider }
    }

    /// ElevenLabs adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to initialize.
    pub fn elevenlabs(config: ElevenLabsConfig) -> Result<Self, ApplicationError> {
        let provider = ElevenLabsProvider::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(provider)))
    }

    /// Cartesia adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to initialize.
    pub fn cartesia(config: CartesiaConfig) -> Result<Self, ApplicationError> {
        let provider = CartesiaProvider::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(provider)))
    }

    /// Convert ai_speech error to application error
    ///
    /// Provider error text is kept verbatim so callers can surface it.
    pub(crate) fn map_error(e: SpeechError) -> ApplicationError {
        match e {
            SpeechError::SynthesisFailed { provider, detail } => {
                ApplicationError::Synthesis { provider, detail }
            },
            SpeechError::StreamInterrupted { provider, reason } => ApplicationError::Synthesis {
                provider,
                detail: format!("audio stream interrupted: {reason}"),
            },
            SpeechError::RateLimited { provider, detail } => ApplicationError::RateLimited {
                service: provider.to_string(),
                detail,
            },
            SpeechError::Configuration(msg) => ApplicationError::Configuration(msg),
            e @ (SpeechError::Timeout(_) | SpeechError::ConnectionFailed(_)) => {
                ApplicationError::ExternalService(e.to_string())
            },
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }
}

#[async_trait]
impl SpeechSynthesisPort for SpeechAdapter {
    #[instrument(skip(self, text), fields(provider = %self.provider.provider_kind(), text_len = text.len()))]
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<AudioStream, ApplicationError> {
        let audio = self
            .provider
            .synthesize(text, voice_id)
            .await
            .map_err(Self::map_error)?;

        debug!(content_type = audio.content_type(), "Provider accepted synthesis request");

        let provider = audio.provider();
        let content_type = audio.content_type();
        let chunks = audio.into_chunks().map_err(Self::map_error).boxed();

        Ok(AudioStream::new(provider, content_type, chunks))
    }

    #[instrument(skip(self), fields(provider = %self.provider.provider_kind()))]
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, ApplicationError> {
        let voices = self
            .provider
            .list_voices()
            .await
            .map_err(Self::map_error)?;

        Ok(voices
            .into_iter()
            .map(|v| VoiceInfo {
                id: v.id,
                name: v.name,
                description: v.description,
                accent: v.accent,
            })
            .collect())
    }

    fn provider(&self) -> SpeechProviderKind {
        self.provider.provider_kind()
    }
}
