//! Logo and background upload handlers.

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde_json::{Value, json};
use std::sync::Arc;

use super::super::state::AppState;
use super::{ApiError, api_error, bad_request};

/// Pull the `image` field out of a multipart body.
///
/// Returns the declared media type (empty if absent) and the raw bytes.
async fn read_image_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let media_type = field.content_type().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("Failed to read image: {}", e)))?;
        return Ok((media_type, bytes.to_vec()));
    }
    Err(bad_request("No image field found"))
}

fn upload_reply(stored: bool, media_type: &str) -> Json<Value> {
    if !stored {
        log::info!("[upload] Ignored upload with media type {:?}", media_type);
    }
    Json(json!({"success": true, "stored": stored}))
}

/// POST /api/logo - replace the logo with an uploaded image, unmodified.
pub async fn logo(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (media_type, bytes) = read_image_field(&mut multipart).await?;
    let stored = state
        .studio
        .upload_logo(&media_type, &bytes)
        .await
        .map_err(api_error)?;
    Ok(upload_reply(stored, &media_type))
}

/// POST /api/background - crop, scale and store an uploaded background.
pub async fn background(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (media_type, bytes) = read_image_field(&mut multipart).await?;
    let stored = state
        .studio
        .upload_background(media_type.clone(), bytes)
        .await
        .map_err(|e| {
            log::error!("[upload] Background rejected: {}", e);
            api_error(e)
        })?;
    Ok(upload_reply(stored, &media_type))
}
