//! Voice catalog handler

use application::ProviderVoices;
use axum::{Json, extract::State};

use crate::{error::ApiError, state::AppState};

/// `GET /voices` - voices and sender mappings of every reachable provider
pub async fn list_voices(State(state): State<AppState>) -> Result<Json<Vec<ProviderVoices>>, ApiError> {
    let catalog = state.relay.voice_catalog().await?;
    Ok(Json(catalog))
}
