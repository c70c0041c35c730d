//! Design editing handlers: text, prompt, positions and pointer events.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::{sync::Arc, time::Instant};

use crate::design::TextUpdate;
use crate::drag::PointerEvent;
use crate::layout::Face;
use crate::session::{Command, SessionView};

use super::super::state::AppState;
use super::{ApiError, api_error, bad_request};

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Session snapshot plus studio capabilities.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignResponse {
    #[serde(flatten)]
    pub view: SessionView,
    /// False when no API key is configured; generation requests will be rejected.
    pub generation_configured: bool,
}

async fn view(state: &AppState) -> Json<SessionView> {
    Json(state.studio.session().await.view(Instant::now()))
}

/// GET /api/design - current session snapshot.
pub async fn show(State(state): State<Arc<AppState>>) -> Json<DesignResponse> {
    let Json(view) = view(&state).await;
    Json(DesignResponse {
        view,
        generation_configured: state.config.has_api_key(),
    })
}

/// POST /api/design/text - update any subset of the text fields.
pub async fn update_text(
    State(state): State<Arc<AppState>>,
    Json(update): Json<TextUpdate>,
) -> Result<Json<SessionView>, ApiError> {
    for (field, value) in update.into_fields() {
        state
            .studio
            .apply(Command::SetText(field, value))
            .await
            .map_err(api_error)?;
    }
    Ok(view(&state).await)
}

/// POST /api/prompt - set the generation prompt.
pub async fn update_prompt(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PromptRequest>,
) -> Result<Json<SessionView>, ApiError> {
    state
        .studio
        .apply(Command::SetPrompt(req.prompt))
        .await
        .map_err(api_error)?;
    Ok(view(&state).await)
}

/// POST /api/positions/reset - restore the default layout.
pub async fn reset_positions(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, ApiError> {
    state
        .studio
        .apply(Command::ResetPositions)
        .await
        .map_err(api_error)?;
    log::info!("[design] Element positions reset");
    Ok(view(&state).await)
}

/// POST /api/error/dismiss - clear the error banner.
pub async fn dismiss_error(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, ApiError> {
    state
        .studio
        .apply(Command::DismissError)
        .await
        .map_err(api_error)?;
    Ok(view(&state).await)
}

/// POST /api/pointer/:face - deliver a pointer event to one canvas.
pub async fn pointer(
    State(state): State<Arc<AppState>>,
    Path(face): Path<String>,
    Json(event): Json<PointerEvent>,
) -> Result<Json<Value>, ApiError> {
    let face: Face = face.parse().map_err(bad_request)?;
    state
        .studio
        .apply(Command::Pointer(face, event))
        .await
        .map_err(api_error)?;

    let session = state.studio.session().await;
    Ok(Json(json!({
        "success": true,
        "dragging": session.surface(face).dragging(),
        "elementPositions": session.positions(),
    })))
}
