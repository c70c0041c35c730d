//! Background generation handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::session::Command;

use super::super::state::AppState;
use super::{ApiError, api_error};

/// Optional body for POST /api/generate.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
}

/// POST /api/generate - request a new set of backgrounds.
///
/// A prompt in the body replaces the session prompt first. The call returns
/// once the retry sequence has finished.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    body: Option<Json<GenerateRequest>>,
) -> Result<Json<Value>, ApiError> {
    if let Some(Json(GenerateRequest { prompt: Some(prompt) })) = body {
        state
            .studio
            .apply(Command::SetPrompt(prompt))
            .await
            .map_err(api_error)?;
    }

    let count = state.studio.generate_backgrounds().await.map_err(|e| {
        log::error!("[generate] {}", e);
        api_error(e)
    })?;
    log::info!("[generate] Received {} background(s)", count);

    let session = state.studio.session().await;
    Ok(Json(json!({
        "success": true,
        "count": count,
        "images": session.generated(),
        "background": session.background(),
    })))
}

/// POST /api/background/select/:index - use one generated image as background.
pub async fn select(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<Value>, ApiError> {
    state
        .studio
        .apply(Command::SelectGenerated(index))
        .await
        .map_err(api_error)?;

    let session = state.studio.session().await;
    Ok(Json(json!({
        "success": true,
        "background": session.background(),
    })))
}
