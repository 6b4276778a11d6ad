//! WhatsApp webhook handlers
//!
//! Twilio posts each inbound message to `/webhook`. The handler answers
//! immediately with empty TwiML and sends the voice note in the background;
//! Twilio then downloads the clip from `/media/{name}`.

use axum::{
    Form,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use domain::SynthesisRequest;
use integration_twilio::{EMPTY_TWIML, IncomingMessage, TWIML_CONTENT_TYPE};
use tracing::{error, info, instrument, warn};

use crate::{error::ApiError, state::AppState};

fn twiml_ack() -> Response {
    ([(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)], EMPTY_TWIML).into_response()
}

/// Receive a Twilio WhatsApp message and reply with a voice note
#[instrument(skip(state, message), fields(from = %message.from, sid = ?message.message_sid))]
pub async fn receive_message(
    State(state): State<AppState>,
    Form(message): Form<IncomingMessage>,
) -> Result<Response, ApiError> {
    let service = state
        .voice_reply
        .clone()
        .ok_or_else(|| ApiError::NotFound("WhatsApp webhook is disabled".to_string()))?;

    let Some(text) = message.text() else {
        info!("Message has no text, nothing to speak");
        return Ok(twiml_ack());
    };

    // The display name picks the voice; unknown names use the default voice.
    let sender = message
        .profile_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| message.sender_number());

    let request = match SynthesisRequest::new(text, sender) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Message rejected");
            return Ok(twiml_ack());
        },
    };

    let recipient = message.from.clone();
    tokio::spawn(async move {
        match service.reply(&request, &recipient).await {
            Ok(reply) => info!(
                dialect = %reply.dialect,
                provider = %reply.provider,
                message_id = %reply.message_id,
                "Voice note delivered"
            ),
            Err(e) => error!(error = %e, "Voice reply failed"),
        }
    });

    Ok(twiml_ack())
}

/// Serve a hosted voice note
pub async fn media(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let service = state
        .voice_reply
        .as_ref()
        .ok_or_else(|| ApiError::NotFound(format!("media {name}")))?;

    let audio = service
        .media(&name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("media {name}")))?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}
