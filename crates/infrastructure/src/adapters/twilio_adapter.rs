//! Twilio delivery adapter
//!
//! Implements `VoiceDeliveryPort` by sending hosted clips as WhatsApp media
//! messages.

use application::{error::ApplicationError, ports::VoiceDeliveryPort};
use async_trait::async_trait;
use integration_twilio::{TwilioClient, TwilioClientConfig, TwilioError};
use tracing::{debug, instrument};

/// Adapter that implements `VoiceDeliveryPort` using `TwilioClient`
pub struct TwilioDeliveryAdapter {
    client: TwilioClient,
}

impl TwilioDeliveryAdapter {
    /// Create a new Twilio delivery adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the client configuration is invalid.
    pub fn new(config: TwilioClientConfig) -> Result<Self, ApplicationError> {
        let client = TwilioClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    fn map_error(e: TwilioError) -> ApplicationError {
        match e {
            TwilioError::Configuration(msg) => ApplicationError::Configuration(msg),
            other => ApplicationError::ExternalService(format!("WhatsApp send failed: {other}")),
        }
    }
}

impl std::fmt::Debug for TwilioDeliveryAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioDeliveryAdapter").finish_non_exhaustive()
    }
}

#[async_trait]
impl VoiceDeliveryPort for TwilioDeliveryAdapter {
    #[instrument(skip(self), fields(recipient = %recipient))]
    async fn send_voice(&self, recipient: &str, media_url: &str) -> Result<String, ApplicationError> {
        let sent = self
            .client
            .send_media(recipient, media_url)
            .await
            .map_err(Self::map_error)?;

        debug!(message_sid = %sent.sid, status = ?sent.status, "WhatsApp voice note queued");
        Ok(sent.sid)
    }
}
