//! Port definitions for speech synthesis
//!
//! Defines the trait (port) that speech synthesis adapters must implement.

use async_trait::async_trait;

use domain::SpeechProviderKind;

use crate::error::SpeechError;
use crate::types::{AudioStream, VoiceInfo};

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations of this trait convert text to streamed MP3 audio.
///
/// # Example
///
/// ```ignore
/// use ai_speech::{TextToSpeech, SpeechError};
///
/// async fn speak(tts: &impl TextToSpeech, text: &str) -> Result<bytes::Bytes, SpeechError> {
///     let audio = tts.synthesize(text, "791d5162-d5eb-40f0-8189-f19db44611d8").await?;
///     audio.collect_bytes().await
/// }
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech with the given provider voice
    ///
    /// The returned stream starts yielding as soon as the provider answers
    /// with a success status.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the text is empty, the request fails or
    /// the provider answers with a non-success status.
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<AudioStream, SpeechError>;

    /// List voices available to the configured account
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if listing fails.
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SpeechError>;

    /// Which provider this is
    fn provider_kind(&self) -> SpeechProviderKind;

    /// Get the name of the synthesis model
    fn model_name(&self) -> &str;
}
