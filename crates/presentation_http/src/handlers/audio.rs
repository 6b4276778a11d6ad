//! Audio generation handler

use axum::{
    body::Body,
    extract::State,
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use domain::SynthesisRequest;
use serde::Deserialize;
use tracing::{info, instrument};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Dialect the text was classified as
pub const DIALECT_HEADER: &str = "x-dialect";
/// Provider that produced the audio
pub const PROVIDER_HEADER: &str = "x-speech-provider";
/// `model` or `fallback`
pub const CLASSIFICATION_HEADER: &str = "x-classification";

/// `POST /generate-audio` body
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateAudioRequest {
    /// Text to speak
    #[validate(
        length(min = 1, max = 5000, message = "must be between 1 and 5000 characters"),
        custom(function = "not_blank")
    )]
    pub text: String,

    /// Display name of the sender, selects the voice
    #[validate(
        length(min = 1, max = 128, message = "must be between 1 and 128 characters"),
        custom(function = "not_blank")
    )]
    pub sender: String,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut error = validator::ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Classify, route and stream the audio back
#[instrument(skip(state, request), fields(sender = %request.sender, text_len = request.text.chars().count()))]
pub async fn generate_audio(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateAudioRequest>,
) -> Result<Response, ApiError> {
    let request = SynthesisRequest::new(request.text, request.sender)?;
    let outcome = state.relay.relay(&request).await?;

    info!(
        dialect = %outcome.classification.dialect,
        provider = %outcome.decision.provider,
        "Streaming audio"
    );

    let content_type = HeaderValue::from_str(&outcome.audio.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("audio/mpeg"));

    let headers = [
        ("content-type", content_type),
        (
            DIALECT_HEADER,
            HeaderValue::from_static(outcome.classification.dialect.label()),
        ),
        (
            PROVIDER_HEADER,
            HeaderValue::from_static(outcome.decision.provider.config_key()),
        ),
        (
            CLASSIFICATION_HEADER,
            HeaderValue::from_static(outcome.classification.source.as_str()),
        ),
    ];

    Ok((headers, Body::from_stream(outcome.audio.chunks)).into_response())
}
