//! Application configuration
//!
//! Layered as defaults, then an optional `config.toml`, then environment
//! variables prefixed with `VOICE_RELAY_` (nested keys separated by `__`,
//! e.g. `VOICE_RELAY_SERVER__PORT=9000`). A `.env` file is read first.
//! The plain provider key variables (`GEMINI_API_KEY`, `OPENAI_API_KEY`,
//! `ELEVENLABS_API_KEY`, `CARTESIA_API_KEY`) and the Twilio variables
//! (`TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_WHATSAPP_NUMBER`,
//! `PUBLIC_URL`) fill values left unset.

mod routing;
mod server;
mod speech;
mod whatsapp;

use std::path::Path;

use ai_core::{InferenceConfig, InferenceProvider};
use domain::{RoutingPolicy, SpeechProviderKind, TransliterationPolicy, VoiceDirectory};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use routing::{ClassifierConfig, RoutingConfig, RoutingMode};
pub use server::ServerConfig;
pub use speech::{CartesiaSection, ElevenLabsSection, SpeechConfig};
pub use whatsapp::WhatsAppConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "VOICE_RELAY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Language model used for classification
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Classifier behavior
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Dialect to provider routing
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Speech providers and voice directories
    #[serde(default)]
    pub speech: SpeechConfig,

    /// WhatsApp voice-note replies
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional `config.toml`
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }

        let mut config: Self = Self::builder(config::File::with_name("config").required(false))?
            .build()?
            .try_deserialize()?;
        config.apply_key_fallbacks(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a specific file, then the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or invalid.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let mut config: Self = Self::builder(config::File::from(path.as_ref()).required(true))?
            .build()?
            .try_deserialize()?;
        config.apply_key_fallbacks(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn builder(
        file: config::File<config::FileSourceFile, config::FileFormat>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        Ok(config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8001)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ))
    }

    /// Fill unset API keys and Twilio settings from the plain variables
    ///
    /// `lookup` resolves a variable name; blank values are ignored.
    pub fn apply_key_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let inference_var = match self.inference.provider {
            InferenceProvider::Gemini => "GEMINI_API_KEY",
            InferenceProvider::OpenAI => "OPENAI_API_KEY",
        };

        fill_key(&mut self.inference.api_key, inference_var, &lookup);
        fill_key(
            &mut self.speech.elevenlabs.client.api_key,
            "ELEVENLABS_API_KEY",
            &lookup,
        );
        fill_key(
            &mut self.speech.cartesia.client.api_key,
            "CARTESIA_API_KEY",
            &lookup,
        );

        fill_key(&mut self.whatsapp.auth_token, "TWILIO_AUTH_TOKEN", &lookup);
        fill_value(&mut self.whatsapp.account_sid, "TWILIO_ACCOUNT_SID", &lookup);
        fill_value(&mut self.whatsapp.from_number, "TWILIO_WHATSAPP_NUMBER", &lookup);
        if let Some(url) = lookup("PUBLIC_URL").filter(|u| !u.trim().is_empty()) {
            if self.whatsapp.public_url == WhatsAppConfig::default().public_url {
                self.whatsapp.public_url = url.trim().to_string();
            }
        }
    }

    /// Active routing policy
    #[must_use]
    pub const fn routing_policy(&self) -> RoutingPolicy {
        self.routing.policy()
    }

    /// Active transliteration policy
    #[must_use]
    pub const fn transliteration_policy(&self) -> TransliterationPolicy {
        self.classifier.transliteration
    }

    /// Voice directory for `provider` with configured overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an override is blank.
    pub fn voice_directory(
        &self,
        provider: SpeechProviderKind,
    ) -> Result<VoiceDirectory, domain::DomainError> {
        self.speech.voice_directory(provider)
    }

    /// Check that the configuration can serve requests
    ///
    /// The inference key and the keys of every provider the routing
    /// policy can select are required.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be greater than 0".to_string());
        }

        self.inference
            .validate()
            .map_err(|e| format!("inference: {e}"))?;

        for provider in self.routing_policy().providers() {
            self.speech
                .validate_provider(provider)
                .map_err(|e| format!("speech.{}: {e}", provider.config_key()))?;
            self.voice_directory(provider)
                .map_err(|e| format!("speech.{}.voices: {e}", provider.config_key()))?;
        }

        self.whatsapp
            .validate()
            .map_err(|e| format!("whatsapp: {e}"))?;

        Ok(())
    }
}

fn fill_key<F>(slot: &mut Option<SecretString>, var: &str, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if slot.is_some() {
        return;
    }

    if let Some(value) = lookup(var) {
        let value = value.trim();
        if !value.is_empty() {
            *slot = Some(SecretString::from(value.to_owned()));
            debug!(var, "Using API key from plain environment variable");
        }
    }
}

fn fill_value<F>(slot: &mut Option<String>, var: &str, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if slot.as_deref().is_some_and(|v| !v.trim().is_empty()) {
        return;
    }

    if let Some(value) = lookup(var) {
        let value = value.trim();
        if !value.is_empty() {
            *slot = Some(value.to_owned());
        }
    }
}
