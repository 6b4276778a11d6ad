//! Application layer - Use cases and orchestration
//!
//! Contains the dialect classifier, the provider router, the relay
//! pipeline that drives them and the messenger voice-reply flow, plus the
//! ports the infrastructure layer implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, SynthesisError};
pub use ports::*;
pub use services::*;
