//! Save and email handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::session::Command;

use super::super::state::AppState;
use super::{ApiError, api_error};

/// Optional body for POST /api/email.
#[derive(Debug, Default, Deserialize)]
pub struct EmailRequest {
    pub email: Option<String>,
}

/// POST /api/save - persist the current design.
pub async fn save(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let reply = state.studio.save_design().await.map_err(api_error)?;
    Ok(Json(json!({"success": true, "response": reply})))
}

/// POST /api/email - email the current design.
///
/// An `email` in the body replaces the session address first.
pub async fn email(
    State(state): State<Arc<AppState>>,
    body: Option<Json<EmailRequest>>,
) -> Result<Json<Value>, ApiError> {
    if let Some(Json(EmailRequest { email: Some(address) })) = body {
        state
            .studio
            .apply(Command::SetEmailAddress(address))
            .await
            .map_err(api_error)?;
    }

    let reply = state.studio.send_email().await.map_err(api_error)?;
    Ok(Json(json!({"success": true, "response": reply})))
}
