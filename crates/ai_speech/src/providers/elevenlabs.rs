//! ElevenLabs Speech Provider
//!
//! Implements `TextToSpeech` on the ElevenLabs streaming endpoint
//! (`/v1/text-to-speech/{voice_id}/stream`). MP3 chunks are forwarded as
//! they arrive.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use domain::SpeechProviderKind;

use super::{error_from_response, http_client, stream_response};
use crate::config::ElevenLabsConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioStream, MP3_CONTENT_TYPE, VoiceInfo};

const API_KEY_HEADER: &str = "xi-api-key";
const PROVIDER: SpeechProviderKind = SpeechProviderKind::ElevenLabs;

/// ElevenLabs text-to-speech provider
#[derive(Debug, Clone)]
pub struct ElevenLabsProvider {
    client: Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsProvider {
    /// Create a new ElevenLabs provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: ElevenLabsConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = http_client(config.timeout_ms)?;

        Ok(Self { client, config })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn stream_url(&self, voice_id: &str) -> String {
        format!("{}/v1/text-to-speech/{voice_id}/stream", self.base_url())
    }

    fn voices_url(&self) -> String {
        format!("{}/v1/voices", self.base_url())
    }
}

/// ElevenLabs TTS request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<ElevenLabsVoice>,
}

#[derive(Debug, Deserialize)]
struct ElevenLabsVoice {
    voice_id: String,
    name: String,
    #[serde(default)]
    labels: VoiceLabels,
}

#[derive(Debug, Default, Deserialize)]
struct VoiceLabels {
    #[serde(default)]
    accent: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

impl From<ElevenLabsVoice> for VoiceInfo {
    fn from(voice: ElevenLabsVoice) -> Self {
        Self {
            id: voice.voice_id,
            name: voice.name,
            description: voice.labels.description,
            accent: voice.labels.accent,
            language: voice.labels.language,
        }
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsProvider {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice_id = %voice_id))]
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<AudioStream, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::empty_text(PROVIDER));
        }

        let request = TtsRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        debug!("Requesting ElevenLabs audio stream");

        let response = self
            .client
            .post(self.stream_url(voice_id))
            .query(&[("output_format", self.config.output_format.as_str())])
            .header(API_KEY_HEADER, self.config.api_key_str())
            .header(ACCEPT, MP3_CONTENT_TYPE)
            .json(&request)
            .send()
            .await
            .map_err(|e| SpeechError::from_transport(&e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            let status = response.status();
            let err = error_from_response(PROVIDER, response).await;
            warn!(status = %status, error = %err, "ElevenLabs synthesis failed");
            return Err(err);
        }

        Ok(stream_response(PROVIDER, response))
    }

    #[instrument(skip(self))]
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        let response = self
            .client
            .get(self.voices_url())
            .header(API_KEY_HEADER, self.config.api_key_str())
            .send()
            .await
            .map_err(|e| SpeechError::from_transport(&e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            return Err(error_from_response(PROVIDER, response).await);
        }

        let voices: VoicesResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse voices: {e}")))?;

        debug!(count = voices.voices.len(), "Listed ElevenLabs voices");

        Ok(voices.voices.into_iter().map(VoiceInfo::from).collect())
    }

    fn provider_kind(&self) -> SpeechProviderKind {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.config.model_id
    }
}
