//! # Image Payloads
//!
//! Uploaded and generated images travel through the studio as data URLs
//! (`data:<media-type>;base64,<payload>`), the same opaque text blob that is
//! rendered into the SVG canvases and inlined into submission bodies.
//!
//! - [`normalize`]: centered square crop to 400×400 for background uploads
//! - [`logo_from_upload`]: logo uploads, stored unmodified

pub mod normalize;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::error::FlyerError;

pub use normalize::{CropRegion, NORMALIZED_SIZE, encode_png, normalize_background, normalize_image, square_crop};

/// An image encoded as a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageData(String);

impl ImageData {
    /// Encode raw bytes of the given media type.
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", media_type, STANDARD.encode(bytes)))
    }

    /// Wrap PNG bytes that are already base64 encoded.
    pub fn from_png_base64(encoded: &str) -> Self {
        Self(format!("data:image/png;base64,{}", encoded))
    }

    /// Wrap an existing data URL without inspecting it.
    pub fn from_data_url(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media type declared in the data URL header, if well formed.
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let (header, _) = rest.split_once(',')?;
        Some(header.split(';').next().unwrap_or(header))
    }

    /// Decode the base64 payload back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, FlyerError> {
        let (_, payload) = self
            .0
            .split_once(";base64,")
            .ok_or_else(|| FlyerError::Decode("not a base64 data URL".to_string()))?;
        STANDARD
            .decode(payload)
            .map_err(|e| FlyerError::Decode(format!("invalid base64 payload: {}", e)))
    }
}

/// Whether a declared media type names an image.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// Accept a logo upload as-is. Non-image uploads are ignored.
pub fn logo_from_upload(media_type: &str, bytes: &[u8]) -> Option<ImageData> {
    if !is_image_media_type(media_type) {
        return None;
    }
    Some(ImageData::from_bytes(media_type.trim(), bytes))
}
