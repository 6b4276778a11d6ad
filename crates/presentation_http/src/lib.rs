//! Voice relay HTTP presentation layer
//!
//! Exposes the relay pipeline over HTTP: `POST /generate-audio` streams
//! MP3 audio for a `{text, sender}` body. When WhatsApp replies are
//! enabled, `POST /webhook` accepts Twilio messages and `GET /media/{name}`
//! serves the hosted voice notes.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{RequestId, RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::{create_app, create_router};
pub use state::AppState;
