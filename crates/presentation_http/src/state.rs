//! Application state shared across handlers

use std::sync::Arc;

use application::{RelayService, VoiceReplyService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Classification, routing and synthesis pipeline
    pub relay: Arc<RelayService>,
    /// WhatsApp voice replies, when enabled
    pub voice_reply: Option<Arc<VoiceReplyService>>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state from a relay service and its configuration
    pub fn new(relay: Arc<RelayService>, config: AppConfig) -> Self {
        Self {
            relay,
            voice_reply: None,
            config: Arc::new(config),
        }
    }

    /// Enable the WhatsApp webhook
    #[must_use]
    pub fn with_voice_reply(mut self, service: VoiceReplyService) -> Self {
        self.voice_reply = Some(Arc::new(service));
        self
    }
}
