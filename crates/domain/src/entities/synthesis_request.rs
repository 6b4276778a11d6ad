//! Synthesis request - One inbound chat utterance to be spoken

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Upper bound on utterance length, in characters
pub const MAX_TEXT_CHARS: usize = 5000;

/// Upper bound on sender identity length, in characters
pub const MAX_SENDER_CHARS: usize = 128;

/// A validated `{text, sender}` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    text: String,
    sender: String,
}

impl SynthesisRequest {
    /// Create a request, rejecting blank or oversized fields
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if `text` or `sender` is blank
    /// or exceeds its length limit.
    pub fn new(text: impl Into<String>, sender: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let sender = sender.into();

        if text.trim().is_empty() {
            return Err(DomainError::ValidationError("text must not be empty".to_string()));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(DomainError::ValidationError(format!(
                "text exceeds {MAX_TEXT_CHARS} characters"
            )));
        }
        if sender.trim().is_empty() {
            return Err(DomainError::ValidationError("sender must not be empty".to_string()));
        }
        if sender.chars().count() > MAX_SENDER_CHARS {
            return Err(DomainError::ValidationError(format!(
                "sender exceeds {MAX_SENDER_CHARS} characters"
            )));
        }

        Ok(Self { text, sender })
    }

    /// The utterance to speak
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The chat participant who wrote it
    #[must_use]
    pub fn sender(&self) -> &str {
        &self.sender
    }
}
