//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod delivery_port;
mod inference_port;
mod media_store_port;
mod speech_port;

#[cfg(test)]
pub use delivery_port::MockVoiceDeliveryPort;
pub use delivery_port::VoiceDeliveryPort;
#[cfg(test)]
pub use inference_port::MockInferencePort;
pub use inference_port::{InferencePort, InferenceResult};
#[cfg(test)]
pub use media_store_port::MockMediaStorePort;
pub use media_store_port::MediaStorePort;
#[cfg(test)]
pub use speech_port::MockSpeechSynthesisPort;
pub use speech_port::{AudioChunks, AudioStream, SpeechSynthesisPort, VoiceInfo};
