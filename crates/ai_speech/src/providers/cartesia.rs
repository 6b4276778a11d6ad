//! Cartesia Speech Provider
//!
//! Implements `TextToSpeech` on Cartesia's `/tts/bytes` endpoint with the
//! multilingual Sonic model.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use domain::SpeechProviderKind;

use super::{error_from_response, http_client, stream_response};
use crate::config::CartesiaConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioStream, VoiceInfo};

const API_KEY_HEADER: &str = "X-API-Key";
const VERSION_HEADER: &str = "Cartesia-Version";
const PROVIDER: SpeechProviderKind = SpeechProviderKind::Cartesia;

/// Cartesia Sonic text-to-speech provider
#[derive(Debug, Clone)]
pub struct CartesiaProvider {
    client: Client,
    config: CartesiaConfig,
}

impl CartesiaProvider {
    /// Create a new Cartesia provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: CartesiaConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = http_client(config.timeout_ms)?;

        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

/// Cartesia `/tts/bytes` request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model_id: &'a str,
    transcript: &'a str,
    voice: VoiceSpecifier<'a>,
    output_format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct VoiceSpecifier<'a> {
    mode: &'static str,
    id: &'a str,
}

#[derive(Debug, Serialize)]
struct OutputFormat {
    container: &'static str,
    bit_rate: u32,
    sample_rate: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VoicesResponse {
    List(Vec<CartesiaVoice>),
    Page { data: Vec<CartesiaVoice> },
}

impl VoicesResponse {
    fn into_voices(self) -> Vec<CartesiaVoice> {
        match self {
            Self::List(voices) | Self::Page { data: voices } => voices,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CartesiaVoice {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

impl From<CartesiaVoice> for VoiceInfo {
    fn from(voice: CartesiaVoice) -> Self {
        Self {
            id: voice.id,
            name: voice.name,
            description: voice.description.filter(|d| !d.trim().is_empty()),
            accent: None,
            language: voice.language,
        }
    }
}

#[async_trait]
impl TextToSpeech for CartesiaProvider {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice_id = %voice_id))]
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<AudioStream, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::empty_text(PROVIDER));
        }

        let request = TtsRequest {
            model_id: &self.config.model_id,
            transcript: text,
            voice: VoiceSpecifier {
                mode: "id",
                id: voice_id,
            },
            output_format: OutputFormat {
                container: "mp3",
                bit_rate: self.config.bit_rate,
                sample_rate: self.config.sample_rate,
            },
        };

        debug!("Requesting Cartesia audio bytes");

        let response = self
            .client
            .post(self.api_url("tts/bytes"))
            .header(API_KEY_HEADER, self.config.api_key_str())
            .header(VERSION_HEADER, &self.config.api_version)
            .json(&request)
            .send()
            .await
            .map_err(|e| SpeechError::from_transport(&e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            let status = response.status();
            let err = error_from_response(PROVIDER, response).await;
            warn!(status = %status, error = %err, "Cartesia synthesis failed");
            return Err(err);
        }

        Ok(stream_response(PROVIDER, response))
    }

    #[instrument(skip(self))]
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError> {
        let response = self
            .client
            .get(self.api_url("voices"))
            .header(API_KEY_HEADER, self.config.api_key_str())
            .header(VERSION_HEADER, &self.config.api_version)
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

        let voices = voices.into_voices();
        debug!(count = voices.len(), "Listed Cartesia voices");

        Ok(voices.into_iter().map(VoiceInfo::from).collect())
    }

    fn provider_kind(&self) -> SpeechProviderKind {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.config.model_id
    }
}
