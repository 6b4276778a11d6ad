//! Application-level errors

use domain::{DomainError, SpeechProviderKind};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// Speech provider rejected or failed the synthesis request
    #[error("{provider} synthesis failed: {detail}")]
    Synthesis {
        /// Provider that failed
        provider: SpeechProviderKind,
        /// Provider error text
        detail: String,
    },

    /// Routing selected a provider with no configured client
    #[error("Speech provider {0} is not configured")]
    ProviderNotConfigured(SpeechProviderKind),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Upstream service answered with a rate limit
    #[error("{service} rate limit exceeded: {detail}")]
    RateLimited {
        /// Service that throttled the request
        service: String,
        /// Upstream error text
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error surfaced by routing and synthesis
pub type SynthesisError = ApplicationError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesis_error_message_carries_detail() {
        let err = ApplicationError::Synthesis {
            provider: SpeechProviderKind::Cartesia,
            detail: "voice not found".to_string(),
        };
        assert_eq!(err.to_string(), "Cartesia synthesis failed: voice not found");
    }

    #[test]
    fn provider_not_configured_message() {
        let err = ApplicationError::ProviderNotConfigured(SpeechProviderKind::ElevenLabs);
        assert_eq!(err.to_string(), "Speech provider ElevenLabs is not configured");
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::ValidationError("text must not be empty".into()).into();
        assert!(err.to_string().contains("text must not be empty"));
    }

    #[test]
    fn rate_limited_message_carries_detail() {
        let err = ApplicationError::RateLimited {
            service: "ElevenLabs".to_string(),
            detail: "You have 3 credits remaining, 40 required".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ElevenLabs rate limit exceeded: You have 3 credits remaining, 40 required"
        );
    }
}
