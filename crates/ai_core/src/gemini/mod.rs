//! Google Gemini inference engine
//!
//! Talks to the `generateContent` REST endpoint and requests
//! `application/json` output when the request asks for JSON mode.

mod client;

pub use client::GeminiInferenceEngine;
