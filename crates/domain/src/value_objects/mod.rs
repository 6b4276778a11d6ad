//! Value Objects - Immutable, identity-less domain primitives

mod dialect;
mod policies;
mod speech_provider_kind;

pub use dialect::Dialect;
pub use policies::{RoutingPolicy, TransliterationPolicy};
pub use speech_provider_kind::SpeechProviderKind;
