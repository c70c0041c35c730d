//! QR placeholder drawn on the front face.

use qrcode::{Color, QrCode};
use std::fmt::Write;

/// Draw a QR symbol for `text` filling a `size`×`size` box at the origin.
///
/// Falls back to a labelled blank tile when the text cannot be encoded.
pub fn qr_symbol(out: &mut String, text: &str, size: u32) {
    let Ok(code) = QrCode::new(text.as_bytes()) else {
        let _ = write!(
            out,
            r##"<text x="{c}" y="{c}" text-anchor="middle" dominant-baseline="middle" font-size="14" fill="#000000">QR Code</text>"##,
            c = size / 2
        );
        return;
    };

    let width = code.width();
    // One module of quiet zone on each side
    let modules = (width + 2) as f32;
    let scale = size as f32 / modules;

    let mut path = String::new();
    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color == Color::Dark {
            let _ = write!(path, "M{} {}h1v1h-1z", i % width + 1, i / width + 1);
        }
    }

    let _ = write!(
        out,
        r##"<path transform="scale({:.4})" d="{}" fill="#000000" shape-rendering="crispEdges"/>"##,
        scale, path
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_has_dark_modules() {
        let mut out = String::new();
        qr_symbol(&mut out, "Scan the QR code for the event Agenda", 120);
        assert!(out.starts_with("<path"));
        assert!(out.matches("h1v1h-1z").count() > 100);
    }

    #[test]
    fn test_oversized_text_falls_back() {
        let mut out = String::new();
        qr_symbol(&mut out, &"x".repeat(10_000), 120);
        assert!(out.contains(">QR Code</text>"));
    }
}
