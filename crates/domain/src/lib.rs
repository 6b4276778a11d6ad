//! Domain layer for the voice relay
//!
//! Dialects, speech providers, voice directories and the per-request
//! classification/synthesis types. No I/O happens here.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
