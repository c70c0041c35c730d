//! HTTP handlers for the server.

pub mod design;
pub mod generate;
pub mod render;
pub mod submit;
pub mod upload;

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

use crate::error::FlyerError;

/// Error response shared by the JSON handlers.
pub type ApiError = (StatusCode, Json<Value>);

/// Map a [`FlyerError`] to a status code and `{"success": false, "error": ...}` body.
pub fn api_error(err: FlyerError) -> ApiError {
    let status = match &err {
        FlyerError::Validation(_) => StatusCode::BAD_REQUEST,
        FlyerError::Busy(_) => StatusCode::CONFLICT,
        FlyerError::Image(_) => StatusCode::UNPROCESSABLE_ENTITY,
        FlyerError::Service { .. }
        | FlyerError::Generation(_)
        | FlyerError::Transport(_)
        | FlyerError::Decode(_) => StatusCode::BAD_GATEWAY,
        FlyerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({"success": false, "error": err.to_string()})))
}

/// 400 with a plain message, for malformed request parts.
pub fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"success": false, "error": message.into()})),
    )
}
