//! Twilio client for sending WhatsApp messages
//!
//! Uses the Programmable Messaging API (`/2010-04-01/Accounts/{sid}/Messages.json`).

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Prefix Twilio puts on WhatsApp addresses
pub const WHATSAPP_PREFIX: &str = "whatsapp:";

/// Twilio API errors
#[derive(Debug, Error)]
pub enum TwilioError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Twilio API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Missing configuration: {0}")]
    Configuration(String),
}

/// Twilio client configuration
#[derive(Debug, Clone)]
pub struct TwilioClientConfig {
    /// Account SID (`AC...`)
    pub account_sid: String,
    /// Auth token paired with the account SID
    pub auth_token: SecretString,
    /// Sending WhatsApp number, with or without the `whatsapp:` prefix
    pub from_number: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl TwilioClientConfig {
    /// Default Twilio API endpoint
    pub const DEFAULT_BASE_URL: &'static str = "https://api.twilio.com";
}

/// Message resource returned by Twilio on creation
#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    /// Message SID (`SM...` or `MM...`)
    pub sid: String,
    /// Delivery status at creation time, usually `queued`
    #[serde(default)]
    pub status: Option<String>,
}

/// Twilio error body
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Twilio client for WhatsApp delivery
#[derive(Debug, Clone)]
pub struct TwilioClient {
    client: Client,
    config: TwilioClientConfig,
}

impl TwilioClient {
    /// Create a new Twilio client
    ///
    /// # Errors
    ///
    /// Returns `TwilioError::Configuration` when a credential or the sender
    /// number is missing, or the HTTP client cannot be built.
    pub fn new(config: TwilioClientConfig) -> Result<Self, TwilioError> {
        if config.account_sid.trim().is_empty() {
            return Err(TwilioError::Configuration("account_sid is required".to_string()));
        }
        if config.auth_token.expose_secret().trim().is_empty() {
            return Err(TwilioError::Configuration("auth_token is required".to_string()));
        }
        if config.from_number.trim().is_empty() {
            return Err(TwilioError::Configuration("from_number is required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| TwilioError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    /// Send a WhatsApp message whose only content is the media at `media_url`
    ///
    /// `to` may be a bare E.164 number or a `whatsapp:` address.
    #[instrument(skip(self), fields(to = %to))]
    pub async fn send_media(&self, to: &str, media_url: &str) -> Result<SentMessage, TwilioError> {
        let from = whatsapp_address(&self.config.from_number);
        let to = whatsapp_address(to);
        let form = [
            ("From", from.as_str()),
            ("To", to.as_str()),
            ("MediaUrl", media_url),
        ];

        debug!(media_url, "Sending WhatsApp media message");

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(
                &self.config.account_sid,
                Some(self.config.auth_token.expose_secret()),
            )
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let error = serde_json::from_str::<ApiErrorResponse>(&body).ok();
        let code = error
            .as_ref()
            .and_then(|e| e.code)
            .unwrap_or_else(|| i64::from(status.as_u16()));
        let message = error
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| if body.trim().is_empty() { format!("HTTP {status}") } else { body });

        warn!(status = %status, code, "Twilio rejected message");
        Err(TwilioError::Api { code, message })
    }
}

/// Normalize a number to Twilio's `whatsapp:+...` address form
pub fn whatsapp_address(number: &str) -> String {
    let number = number.trim();
    if number.starts_with(WHATSAPP_PREFIX) {
        number.to_string()
    } else {
        format!("{WHATSAPP_PREFIX}{number}")
    }
}
