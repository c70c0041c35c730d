//! SVG building blocks shared by both canvas faces.

use std::fmt::Write;

use crate::media::ImageData;

/// Escape text for use in SVG/HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Greedy word wrap to lines of at most `max_chars` characters.
///
/// A single word longer than the limit gets a line of its own.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// `<image>` element for a data-URL image.
pub fn image(out: &mut String, data: &ImageData, width: u32, height: u32, aspect: &str) {
    let _ = write!(
        out,
        r#"<image href="{}" x="0" y="0" width="{}" height="{}" preserveAspectRatio="{}"/>"#,
        escape(data.as_str()),
        width,
        height,
        aspect
    );
}

/// Built-in hexagon mark used when no logo was uploaded.
pub fn hex_logo(out: &mut String, size: u32) {
    let _ = write!(
        out,
        r##"<svg width="{size}" height="{size}" viewBox="0 0 100 115" fill="none">"##,
        size = size
    );
    out.push_str(r##"<path d="M50 0L93.3 25V75L50 100L6.7 75V25L50 0Z" fill="#FFFFFF"/>"##);
    out.push_str(
        r##"<path d="M50 6.9282L88.9711 30.1345V79.8655L50 103.072L11.0289 79.8655V30.1345L50 6.9282Z" fill="#0B2349"/>"##,
    );
    for (d, stroke) in [
        ("M62.5 37.5L50 62.5L37.5 37.5", "#E5732A"),
        ("M75 25V50L62.5 75", "#E5732A"),
        ("M25 25V50L37.5 75", "#FFFFFF"),
    ] {
        let _ = write!(
            out,
            r#"<path d="{}" stroke="{}" stroke-width="5" stroke-linecap="round" stroke-linejoin="round"/>"#,
            d, stroke
        );
    }
    out.push_str("</svg>");
}
