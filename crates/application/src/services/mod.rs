//! Application services - Use case implementations

mod dialect_classifier;
mod provider_router;
mod relay_service;
mod voice_reply_service;

pub use dialect_classifier::{ClassificationError, DialectClassifier};
pub use provider_router::{ProviderRouter, RouteDecision};
pub use relay_service::{ProviderVoices, RelayOutcome, RelayPlan, RelayService};
pub use voice_reply_service::{MEDIA_ROUTE, VoiceReply, VoiceReplyService};
