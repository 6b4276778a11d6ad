//! Configuration for the speech providers

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// ElevenLabs client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    /// API key (sensitive)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_elevenlabs_base_url")]
    pub base_url: String,

    /// Synthesis model
    #[serde(default = "default_elevenlabs_model")]
    pub model_id: String,

    /// Output format query parameter
    #[serde(default = "default_elevenlabs_output_format")]
    pub output_format: String,

    /// Voice stability (0.0 - 1.0)
    #[serde(default = "default_stability")]
    pub stability: f32,

    /// Voice similarity boost (0.0 - 1.0)
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,

    /// Connect timeout and longest gap between response bytes, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Cartesia client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartesiaConfig {
    /// API key (sensitive)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_cartesia_base_url")]
    pub base_url: String,

    /// Value of the `Cartesia-Version` header
    #[serde(default = "default_cartesia_version")]
    pub api_version: String,

    /// Synthesis model
    #[serde(default = "default_cartesia_model")]
    pub model_id: String,

    /// MP3 bit rate
    #[serde(default = "default_bit_rate")]
    pub bit_rate: u32,

    /// Sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Connect timeout and longest gap between response bytes, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_elevenlabs_output_format() -> String {
    "mp3_44100_128".to_string()
}

const fn default_stability() -> f32 {
    0.5
}

const fn default_similarity_boost() -> f32 {
    0.75
}

fn default_cartesia_base_url() -> String {
    "https://api.cartesia.ai".to_string()
}

fn default_cartesia_version() -> String {
    "2024-06-10".to_string()
}

fn default_cartesia_model() -> String {
    "sonic-multilingual".to_string()
}

const fn default_bit_rate() -> u32 {
    128_000
}

const fn default_sample_rate() -> u32 {
    44_100
}

const fn default_timeout_ms() -> u64 {
    30_000 // 30 seconds
}

fn key_str(key: Option<&SecretString>) -> &str {
    key.map_or("", ExposeSecret::expose_secret)
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_elevenlabs_base_url(),
            model_id: default_elevenlabs_model(),
            output_format: default_elevenlabs_output_format(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ElevenLabsConfig {
    /// Default config with the given key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// API key as a string reference (empty when unset)
    #[must_use]
    pub fn api_key_str(&self) -> &str {
        key_str(self.api_key.as_ref())
    }

    /// Whether an API key is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key_str().is_empty()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.has_api_key() {
            return Err("ElevenLabs API key is required".to_string());
        }

        if !(0.0..=1.0).contains(&self.stability) {
            return Err(format!(
                "Stability must be between 0.0 and 1.0, got {}",
                self.stability
            ));
        }

        if !(0.0..=1.0).contains(&self.similarity_boost) {
            return Err(format!(
                "Similarity boost must be between 0.0 and 1.0, got {}",
                self.similarity_boost
            ));
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Default for CartesiaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_cartesia_base_url(),
            api_version: default_cartesia_version(),
            model_id: default_cartesia_model(),
            bit_rate: default_bit_rate(),
            sample_rate: default_sample_rate(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl CartesiaConfig {
    /// Default config with the given key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// API key as a string reference (empty when unset)
    #[must_use]
    pub fn api_key_str(&self) -> &str {
        key_str(self.api_key.as_ref())
    }

    /// Whether an API key is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key_str().is_empty()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.has_api_key() {
            return Err("Cartesia API key is required".to_string());
        }

        if self.api_version.trim().is_empty() {
            return Err("Cartesia API version must not be empty".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
