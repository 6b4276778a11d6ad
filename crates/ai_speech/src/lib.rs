//! AI Speech - Streaming text-to-speech providers
//!
//! Provides the `TextToSpeech` port and two hosted implementations:
//! - ElevenLabs (English-optimized voices)
//! - Cartesia Sonic (Hindi, Hinglish and code-switched speech)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains concrete implementations (adapters)
//!
//! Audio is never buffered whole: providers return an [`AudioStream`] that
//! yields MP3 chunks as they arrive from the upstream response.
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{ElevenLabsConfig, ElevenLabsProvider, TextToSpeech};
//!
//! let provider = ElevenLabsProvider::new(ElevenLabsConfig::with_api_key("key"))?;
//! let audio = provider.synthesize("Hello there", "JBFqnCBsd6RMkjVDRZzb").await?;
//! let bytes = audio.collect_bytes().await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{CartesiaConfig, ElevenLabsConfig};
pub use error::SpeechError;
pub use ports::TextToSpeech;
pub use providers::{CartesiaProvider, ElevenLabsProvider};
pub use types::{AudioChunkStream, AudioStream, MP3_CONTENT_TYPE, VoiceInfo};
