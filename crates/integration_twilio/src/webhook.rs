//! Twilio inbound message webhook
//!
//! Twilio posts `application/x-www-form-urlencoded` fields and expects a
//! TwiML document back. Replies are sent out of band, so the webhook always
//! answers with an empty `<Response/>`.

use serde::Deserialize;

use crate::client::WHATSAPP_PREFIX;

/// TwiML body that acknowledges a message without replying inline
pub const EMPTY_TWIML: &str = "<Response></Response>";

/// Content type Twilio expects for TwiML
pub const TWIML_CONTENT_TYPE: &str = "text/xml";

/// Fields of an inbound WhatsApp message webhook
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    /// Sender address, e.g. `whatsapp:+919876543210`
    #[serde(rename = "From")]
    pub from: String,
    /// Message text; absent for media-only messages
    #[serde(rename = "Body", default)]
    pub body: Option<String>,
    #[serde(rename = "MessageSid", default)]
    pub message_sid: Option<String>,
    /// WhatsApp display name of the sender
    #[serde(rename = "ProfileName", default)]
    pub profile_name: Option<String>,
}

impl IncomingMessage {
    /// Message text, if it has any non-whitespace content
    pub fn text(&self) -> Option<&str> {
        self.body.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Sender number without the `whatsapp:` prefix
    pub fn sender_number(&self) -> &str {
        self.from
            .strip_prefix(WHATSAPP_PREFIX)
            .unwrap_or(&self.from)
            .trim()
    }
}
