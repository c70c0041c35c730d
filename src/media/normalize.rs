//! # Background Normalizer
//!
//! Crops an uploaded image to a centered square and rescales it to
//! 400×400, the size of a flyer canvas.
//!
//! ```text
//!   width > height                 height >= width
//!  ┌────┬──────────┬────┐          ┌──────────┐
//!  │    │          │    │          │          │ sourceY
//!  │    │  square  │    │          ├──────────┤
//!  │    │          │    │          │  square  │
//!  └────┴──────────┴────┘          ├──────────┤
//!   sourceX                        │          │
//!                                  └──────────┘
//! ```

use image::{DynamicImage, ImageFormat, imageops::FilterType};
use std::io::Cursor;

use super::{ImageData, is_image_media_type};
use crate::error::FlyerError;

/// Side length of a normalized background, in pixels.
pub const NORMALIZED_SIZE: u32 = 400;

/// Square source region to sample from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// Centered square crop for an image of the given dimensions.
pub fn square_crop(width: u32, height: u32) -> CropRegion {
    let size = width.min(height);
    if width > height {
        CropRegion {
            x: (width - size) / 2,
            y: 0,
            size,
        }
    } else {
        CropRegion {
            x: 0,
            y: (height - size) / 2,
            size,
        }
    }
}

/// Crop to the centered square and scale it to 400×400.
pub fn normalize_image(img: &DynamicImage) -> DynamicImage {
    let region = square_crop(img.width(), img.height());
    img.crop_imm(region.x, region.y, region.size, region.size)
        .resize_exact(NORMALIZED_SIZE, NORMALIZED_SIZE, FilterType::Triangle)
}

/// Encode an image as PNG bytes.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, FlyerError> {
    let mut png_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| FlyerError::Image(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}

/// Normalize an uploaded background.
///
/// Returns `Ok(None)` when the declared media type is not an image; the
/// upload is silently ignored. Corrupt image data surfaces whatever the
/// decoder reports.
pub fn normalize_background(media_type: &str, bytes: &[u8]) -> Result<Option<ImageData>, FlyerError> {
    if !is_image_media_type(media_type) {
        return Ok(None);
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| FlyerError::Image(format!("Failed to decode image: {}", e)))?;
    let normalized = normalize_image(&img);
    let png = encode_png(&normalized)?;

    Ok(Some(ImageData::from_bytes("image/png", &png)))
}
