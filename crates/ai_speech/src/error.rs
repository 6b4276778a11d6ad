//! Speech synthesis errors

use domain::SpeechProviderKind;
use thiserror::Error;

/// Errors that can occur during speech synthesis
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failed to connect to speech service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to speech service failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Provider rejected the synthesis request
    #[error("{provider} synthesis failed: {detail}")]
    SynthesisFailed {
        /// Provider that failed
        provider: SpeechProviderKind,
        /// Provider's error text
        detail: String,
    },

    /// Audio stream broke off after the response started
    #[error("{provider} audio stream interrupted: {reason}")]
    StreamInterrupted {
        /// Provider whose stream failed
        provider: SpeechProviderKind,
        /// Transport error text
        reason: String,
    },

    /// Invalid response from service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during synthesis
    #[error("Speech synthesis timeout after {0}ms")]
    Timeout(u64),

    /// Provider answered 429
    #[error("{provider} rate limit exceeded: {detail}")]
    RateLimited {
        /// Provider that throttled the request
        provider: SpeechProviderKind,
        /// Provider's error text
        detail: String,
    },
}

impl SpeechError {
    /// Convert a transport error, recording the configured timeout
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Empty-text rejection raised before any network call
    pub(crate) fn empty_text(provider: SpeechProviderKind) -> Self {
        Self::SynthesisFailed {
            provider,
            detail: "Text cannot be empty".to_string(),
        }
    }
}
