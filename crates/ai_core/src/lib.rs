//! AI Core - Language-model engines used for dialect classification
//!
//! Two hosted backends are supported: Google Gemini (`generateContent`) and
//! any OpenAI-compatible chat completions endpoint. Both are asked for a
//! JSON object answer and expose the same [`InferenceEngine`] port.

pub mod config;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod ports;

use std::sync::Arc;

pub use config::{InferenceConfig, InferenceProvider};
pub use error::InferenceError;
pub use gemini::GeminiInferenceEngine;
pub use openai::OpenAIInferenceEngine;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};

/// Build the engine selected by `config.provider`
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the HTTP client
/// cannot be built.
pub fn create_engine(config: InferenceConfig) -> Result<Arc<dyn InferenceEngine>, InferenceError> {
    config.validate().map_err(InferenceError::InvalidConfig)?;

    let engine: Arc<dyn InferenceEngine> = match config.provider {
        InferenceProvider::Gemini => Arc::new(GeminiInferenceEngine::new(config)?),
        InferenceProvider::OpenAI => Arc::new(OpenAIInferenceEngine::new(config)?),
    };
    Ok(engine)
}
