//! Configuration for the language-model engines

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Language-model backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InferenceProvider {
    /// Google Gemini `generateContent` API
    #[default]
    Gemini,
    /// OpenAI-compatible chat completions API
    OpenAI,
}

impl InferenceProvider {
    /// Default base URL for this provider
    #[must_use]
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::OpenAI => "https://api.openai.com/v1",
        }
    }

    /// Default model for this provider
    #[must_use]
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-1.5-flash",
            Self::OpenAI => "gpt-4o",
        }
    }
}

/// Configuration for the inference engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Backend to use
    #[serde(default)]
    pub provider: InferenceProvider,

    /// API key (sensitive)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base URL override (provider default when unset)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model override (provider default when unset)
    #[serde(default)]
    pub model: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

const fn default_timeout_ms() -> u64 {
    15_000
}

const fn default_max_tokens() -> u32 {
    1024
}

const fn default_temperature() -> f32 {
    // Low temperature keeps the JSON output stable
    0.1
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            provider: InferenceProvider::default(),
            api_key: None,
            base_url: None,
            model: None,
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl InferenceConfig {
    /// Gemini config with the given key
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self {
            provider: InferenceProvider::Gemini,
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// OpenAI config with the given key
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            provider: InferenceProvider::OpenAI,
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// Effective base URL, without trailing slash
    #[must_use]
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
            .trim_end_matches('/')
    }

    /// Effective model name
    #[must_use]
    pub fn resolved_model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// API key as a string reference (empty when unset)
    #[must_use]
    pub fn api_key_str(&self) -> &str {
        self.api_key
            .as_ref()
            .map_or("", ExposeSecret::expose_secret)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key_str().is_empty() {
            return Err(format!("API key is required for the {:?} provider", self.provider));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
