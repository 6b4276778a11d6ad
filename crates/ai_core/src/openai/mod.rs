//! OpenAI-compatible inference engine
//!
//! Works against `api.openai.com` or any server exposing the same
//! `/chat/completions` contract.

mod client;

pub use client::OpenAIInferenceEngine;
