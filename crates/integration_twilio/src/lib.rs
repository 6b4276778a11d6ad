//! Twilio WhatsApp integration
//!
//! Parses Twilio's inbound message webhook and sends WhatsApp media replies
//! through the Programmable Messaging API.

pub mod client;
pub mod webhook;

pub use client::{SentMessage, TwilioClient, TwilioClientConfig, TwilioError};
pub use webhook::{EMPTY_TWIML, IncomingMessage, TWIML_CONTENT_TYPE};
