//! Infrastructure adapters
//!
//! Adapters connect application ports to the `ai_core`, `ai_speech` and
//! `integration_twilio` clients and to local storage.

mod inference_adapter;
mod media_store;
mod speech_adapter;
mod twilio_adapter;

pub use inference_adapter::InferenceAdapter;
pub use media_store::FileMediaStore;
pub use speech_adapter::SpeechAdapter;
pub use twilio_adapter::TwilioDeliveryAdapter;
