//! Voice reply service - Messenger text in, voice note out
//!
//! Runs the relay pipeline for an incoming chat message, hosts the MP3 so
//! the messenger can fetch it by URL, then sends it back to the sender.

use std::{fmt, sync::Arc};

use bytes::Bytes;
use domain::{Dialect, SpeechProviderKind, SynthesisRequest};
use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    ports::{MediaStorePort, VoiceDeliveryPort},
    services::RelayService,
};

/// Path under which hosted clips are served
pub const MEDIA_ROUTE: &str = "/media";

/// A delivered voice note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceReply {
    /// Dialect the text was spoken in
    pub dialect: Dialect,
    /// Provider that synthesized it
    pub provider: SpeechProviderKind,
    /// Public URL of the hosted clip
    pub media_url: String,
    /// Messenger message id
    pub message_id: String,
}

/// Turns incoming chat messages into voice-note replies
pub struct VoiceReplyService {
    relay: Arc<RelayService>,
    store: Arc<dyn MediaStorePort>,
    delivery: Arc<dyn VoiceDeliveryPort>,
    public_url: String,
}

impl fmt::Debug for VoiceReplyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceReplyService")
            .field("relay", &self.relay)
            .field("public_url", &self.public_url)
            .finish_non_exhaustive()
    }
}

impl VoiceReplyService {
    /// Create a voice reply service
    ///
    /// `public_url` is the externally reachable base URL of this server.
    pub fn new(
        relay: Arc<RelayService>,
        store: Arc<dyn MediaStorePort>,
        delivery: Arc<dyn VoiceDeliveryPort>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            relay,
            store,
            delivery,
            public_url: public_url.into(),
        }
    }

    /// Public URL of a stored clip
    pub fn media_url(&self, name: &str) -> String {
        format!("{}{MEDIA_ROUTE}/{name}", self.public_url.trim_end_matches('/'))
    }

    /// Speak `request` and send the clip to `recipient`
    ///
    /// # Errors
    ///
    /// Returns the synthesis error, a storage error, or the messenger's
    /// rejection. Classification problems never surface here.
    #[instrument(skip(self, request), fields(sender = %request.sender(), text_len = request.text().len()))]
    pub async fn reply(
        &self,
        request: &SynthesisRequest,
        recipient: &str,
    ) -> Result<VoiceReply, ApplicationError> {
        let outcome = self.relay.relay(request).await?;
        let provider = outcome.decision.provider;

        let audio = outcome.audio.collect_bytes().await?;
        if audio.is_empty() {
            return Err(ApplicationError::Synthesis {
                provider,
                detail: "provider returned no audio".to_string(),
            });
        }

        let name = self.store.put(Bytes::from(audio)).await?;
        let media_url = self.media_url(&name);
        let message_id = self.delivery.send_voice(recipient, &media_url).await?;

        info!(%provider, message_id = %message_id, "Voice reply sent");

        Ok(VoiceReply {
            dialect: outcome.classification.dialect,
            provider,
            media_url,
            message_id,
        })
    }

    /// Load a hosted clip
    pub async fn media(&self, name: &str) -> Result<Option<Bytes>, ApplicationError> {
        self.store.get(name).await
    }
}
