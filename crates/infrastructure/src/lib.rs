//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! `ai_core`, `ai_speech` and `integration_twilio` clients, loads
//! configuration and sets up logging.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::{
    build_relay_service, build_router, build_speech_adapter, build_voice_reply_service,
};
pub use config::{
    AppConfig, CartesiaSection, ClassifierConfig, ElevenLabsSection, RoutingConfig, RoutingMode,
    ServerConfig, SpeechConfig, WhatsAppConfig,
};
pub use telemetry::{DEFAULT_LOG_FILTER, LogFormat, TelemetryError, init_logging};
