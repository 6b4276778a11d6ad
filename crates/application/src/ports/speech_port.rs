//! Speech port - Interface for streamed text-to-speech

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use domain::SpeechProviderKind;
use futures::{Stream, StreamExt};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Boxed stream of audio chunks
pub type AudioChunks = Pin<Box<dyn Stream<Item = Result<Bytes, ApplicationError>> + Send>>;

/// Synthesized audio, delivered chunk by chunk
pub struct AudioStream {
    /// Provider that produced the audio
    pub provider: SpeechProviderKind,
    /// MIME type of the audio
    pub content_type: String,
    /// Ordered audio chunks
    pub chunks: AudioChunks,
}

impl AudioStream {
    /// Wrap a chunk stream
    pub fn new(
        provider: SpeechProviderKind,
        content_type: impl Into<String>,
        chunks: AudioChunks,
    ) -> Self {
        Self {
            provider,
            content_type: content_type.into(),
            chunks,
        }
    }

    /// In-memory MP3 stream
    pub fn from_chunks(provider: SpeechProviderKind, chunks: Vec<Bytes>) -> Self {
        let stream = futures::stream::iter(chunks.into_iter().map(Ok)).boxed();
        Self::new(provider, "audio/mpeg", stream)
    }

    /// Drain the stream into a single buffer
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by the stream.
    pub async fn collect_bytes(self) -> Result<Vec<u8>, ApplicationError> {
        let mut chunks = self.chunks;
        let mut buffer = Vec::new();
        while let Some(chunk) = chunks.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer)
    }
}

impl fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioStream")
            .field("provider", &self.provider)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Information about an available voice
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct VoiceInfo {
    /// Voice identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Accent or language label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// Port for a single text-to-speech provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// Synthesize `text` with the provider voice `voice_id`
    async fn synthesize(&self, text: &str, voice_id: &str)
    -> Result<AudioStream, ApplicationError>;

    /// List voices available on the provider account
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, ApplicationError>;

    /// Which provider this port talks to
    fn provider(&self) -> SpeechProviderKind;
}
