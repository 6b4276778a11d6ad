//! Core types for speech synthesis

use std::fmt;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use domain::SpeechProviderKind;

use crate::error::SpeechError;

/// MIME type of every stream produced by this crate
pub const MP3_CONTENT_TYPE: &str = "audio/mpeg";

/// Boxed stream of audio chunks
pub type AudioChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes, SpeechError>> + Send>>;

/// A synthesized utterance delivered as an ordered, finite chunk stream
pub struct AudioStream {
    provider: SpeechProviderKind,
    content_type: &'static str,
    chunks: AudioChunkStream,
}

impl AudioStream {
    /// Wrap a chunk stream
    #[must_use]
    pub fn new(
        provider: SpeechProviderKind,
        content_type: &'static str,
        chunks: AudioChunkStream,
    ) -> Self {
        Self {
            provider,
            content_type,
            chunks,
        }
    }

    /// Build a stream from in-memory chunks
    #[must_use]
    pub fn from_chunks(provider: SpeechProviderKind, chunks: Vec<Bytes>) -> Self {
        let stream = futures::stream::iter(chunks.into_iter().map(Ok)).boxed();
        Self::new(provider, MP3_CONTENT_TYPE, stream)
    }

    /// Provider that produced this audio
    #[must_use]
    pub const fn provider(&self) -> SpeechProviderKind {
        self.provider
    }

    /// MIME type of the audio
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Consume into the underlying chunk stream
    #[must_use]
    pub fn into_chunks(self) -> AudioChunkStream {
        self.chunks
    }

    /// Drain the stream into a single buffer
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by the stream.
    pub async fn collect_bytes(self) -> Result<Bytes, SpeechError> {
        let mut chunks = self.chunks;
        let mut buffer = BytesMut::new();
        while let Some(chunk) = chunks.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
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

/// A voice offered by a provider account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Voice identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of the voice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Accent label (if known)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    /// Primary language code (if known)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl VoiceInfo {
    /// Create a new voice info
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            accent: None,
            language: None,
        }
    }
}
