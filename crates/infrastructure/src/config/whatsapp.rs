//! WhatsApp delivery configuration (Twilio)

use std::path::PathBuf;

use integration_twilio::TwilioClientConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Twilio WhatsApp webhook and voice-note delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Accept `POST /webhook` and reply with voice notes
    #[serde(default)]
    pub enabled: bool,

    /// Twilio account SID
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio auth token (sensitive)
    #[serde(default, skip_serializing)]
    pub auth_token: Option<SecretString>,

    /// Sending WhatsApp number, e.g. `whatsapp:+14155238886`
    #[serde(default)]
    pub from_number: Option<String>,

    /// Twilio API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Externally reachable base URL of this server; Twilio fetches clips from here
    #[serde(default = "default_public_url")]
    pub public_url: String,

    /// Directory hosted clips are written to
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    /// Twilio request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_api_base_url() -> String {
    TwilioClientConfig::DEFAULT_BASE_URL.to_string()
}

fn default_public_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("media")
}

const fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            account_sid: None,
            auth_token: None,
            from_number: None,
            api_base_url: default_api_base_url(),
            public_url: default_public_url(),
            media_dir: default_media_dir(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl WhatsAppConfig {
    /// Twilio client settings
    ///
    /// # Errors
    ///
    /// Returns the name of the first missing credential.
    pub fn client_config(&self) -> Result<TwilioClientConfig, String> {
        let account_sid = non_blank(self.account_sid.as_deref()).ok_or("account_sid is required")?;
        let auth_token = self
            .auth_token
            .as_ref()
            .filter(|t| !t.expose_secret().trim().is_empty())
            .ok_or("auth_token is required")?;
        let from_number = non_blank(self.from_number.as_deref()).ok_or("from_number is required")?;

        Ok(TwilioClientConfig {
            account_sid: account_sid.to_string(),
            auth_token: auth_token.clone(),
            from_number: from_number.to_string(),
            base_url: self.api_base_url.clone(),
            timeout_ms: self.timeout_ms,
        })
    }

    /// Check the section when delivery is enabled
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }
        self.client_config()?;
        if !(self.public_url.starts_with("http://") || self.public_url.starts_with("https://")) {
            return Err("public_url must be an http(s) URL".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
