//! Entities - The per-request data flowing through the relay pipeline

mod classification;
mod synthesis_request;
mod voice_directory;

pub use classification::{ClassificationResult, ClassificationSource};
pub use synthesis_request::{MAX_SENDER_CHARS, MAX_TEXT_CHARS, SynthesisRequest};
pub use voice_directory::VoiceDirectory;
