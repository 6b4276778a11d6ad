//! Delivery port - Interface for sending voice notes to a chat

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for delivering a hosted audio clip to a messenger recipient
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VoiceDeliveryPort: Send + Sync {
    /// Send the audio at `media_url` to `recipient`, returning the message id
    async fn send_voice(&self, recipient: &str, media_url: &str) -> Result<String, ApplicationError>;
}
