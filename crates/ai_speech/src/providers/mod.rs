//! Text-to-speech provider implementations
//!
//! Contains concrete implementations of the `TextToSpeech` trait.

pub mod cartesia;
pub mod elevenlabs;

pub use cartesia::CartesiaProvider;
pub use elevenlabs::ElevenLabsProvider;

use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use reqwest::{Client, Response, StatusCode};

use domain::SpeechProviderKind;

use crate::error::SpeechError;
use crate::types::{AudioChunkStream, AudioStream, MP3_CONTENT_TYPE};

/// HTTP client bounded by connect and idle-read limits
///
/// There is no whole-request deadline: a long utterance keeps streaming as
/// long as the provider keeps sending bytes within `timeout_ms` of each other.
fn http_client(timeout_ms: u64) -> Result<Client, SpeechError> {
    let limit = Duration::from_millis(timeout_ms);
    Client::builder()
        .connect_timeout(limit)
        .read_timeout(limit)
        .build()
        .map_err(|e| SpeechError::Configuration(format!("Failed to create HTTP client: {e}")))
}

/// Turn a non-success response into a `SpeechError`, keeping the provider's text
async fn error_from_response(provider: SpeechProviderKind, response: Response) -> SpeechError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(status, &body);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return SpeechError::RateLimited { provider, detail };
    }

    SpeechError::SynthesisFailed { provider, detail }
}

/// Pull the most useful message out of a provider error body
///
/// Understands `{"detail": "..."}`, `{"detail": {"message": "..."}}`,
/// `{"message": "..."}` and `{"error": "..."}`; anything else is returned
/// verbatim.
pub(crate) fn extract_detail(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {status}");
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    let message = match value.get("detail") {
        Some(serde_json::Value::String(detail)) => Some(detail.clone()),
        Some(detail) => detail
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        None => None,
    }
    .or_else(|| {
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
            .map(str::to_string)
    });

    message.unwrap_or_else(|| body.to_string())
}

/// Wrap a successful response body as a chunked MP3 stream
fn stream_response(provider: SpeechProviderKind, response: Response) -> AudioStream {
    let chunks: AudioChunkStream = response
        .bytes_stream()
        .map(move |chunk: Result<Bytes, reqwest::Error>| {
            chunk.map_err(|e| SpeechError::StreamInterrupted {
                provider,
                reason: e.to_string(),
            })
        })
        .boxed();

    AudioStream::new(provider, MP3_CONTENT_TYPE, chunks)
}
