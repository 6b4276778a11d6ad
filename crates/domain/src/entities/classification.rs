//! Classification result - Dialect and native-script rendering of an utterance

use serde::{Deserialize, Serialize};

use crate::value_objects::Dialect;

/// Whether a classification came from the model or from the fallback path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    /// The language model answered with a usable result
    Model,
    /// The model call or its response failed; defaults were applied
    Fallback,
}

impl ClassificationSource {
    /// Header/log label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Fallback => "fallback",
        }
    }
}

/// Outcome of dialect classification, consumed once by routing and synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Detected dialect
    pub dialect: Dialect,
    /// Text to speak, possibly transliterated into a native script
    pub rendered_text: String,
    /// Where this result came from
    pub source: ClassificationSource,
}

impl ClassificationResult {
    /// A result produced by the model
    pub fn from_model(dialect: Dialect, rendered_text: impl Into<String>) -> Self {
        Self {
            dialect,
            rendered_text: rendered_text.into(),
            source: ClassificationSource::Model,
        }
    }

    /// The English default used when classification fails: original text, untouched
    pub fn fallback(original_text: impl Into<String>) -> Self {
        Self {
            dialect: Dialect::English,
            rendered_text: original_text.into(),
            source: ClassificationSource::Fallback,
        }
    }

    /// Whether this result is the fallback default
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, ClassificationSource::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_english_with_original_text() {
        let result = ClassificationResult::fallback("Sahi hai");
        assert_eq!(result.dialect, Dialect::English);
        assert_eq!(result.rendered_text, "Sahi hai");
        assert!(result.is_fallback());
    }

    #[test]
    fn model_english_is_distinguishable_from_fallback() {
        let model = ClassificationResult::from_model(Dialect::English, "Hello");
        let fallback = ClassificationResult::fallback("Hello");
        assert_eq!(model.dialect, fallback.dialect);
        assert_eq!(model.rendered_text, fallback.rendered_text);
        assert_ne!(model, fallback);
        assert!(!model.is_fallback());
    }

    #[test]
    fn source_labels() {
        assert_eq!(ClassificationSource::Model.as_str(), "model");
        assert_eq!(ClassificationSource::Fallback.as_str(), "fallback");
    }
}
