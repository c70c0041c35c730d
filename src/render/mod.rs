//! # Flyer Renderer
//!
//! Composes a design into two 400×400 SVG canvases.
//!
//! ## Layers (bottom to top)
//!
//! | Layer | Front | Back |
//! |-------|-------|------|
//! | background | image (cover, centered) or `#0B2349` | same |
//! | draggable | header, logo, footer (`-top`) | header, logo, footer (`-bottom`) |
//! | fixed overlay | QR placeholder + caption at (100, 140) | notes panel, centered |
//!
//! Rendering is a pure function of the design, the element positions and
//! the active background. The element being dragged (if any) only changes
//! its CSS transition so it tracks the pointer without easing.
//!
//! ## Modules
//!
//! - [`svg`]: escaping, wrapping, image and logo primitives
//! - [`qr`]: the QR placeholder symbol
//! - [`export`]: print-ready page wrapping both faces

pub mod export;
pub mod qr;
pub mod svg;

use std::fmt::Write;

use crate::design::Design;
use crate::drag::{IDLE_TRANSITION, Transition};
use crate::layout::{ElementId, ElementPositions, Face, Slot};
use crate::media::ImageData;

pub use export::export_document;

/// Side length of each canvas, in pixels.
pub const CANVAS_SIZE: u32 = 400;
/// Fill used when no background image is active.
pub const DEFAULT_BACKGROUND: &str = "#0B2349";
/// Accent color of the year.
pub const ACCENT: &str = "#F97316";

const LOGO_SIZE: u32 = 56;
const FOOTER_WIDTH: u32 = 200;
const QR_ORIGIN: (u32, u32) = (100, 140);
const QR_TILE: u32 = 128;
const QR_BORDER: u32 = 4;
const QR_CAPTION_CHARS: usize = 34;
const NOTES_WIDTH: u32 = 360;
const NOTES_HEIGHT: u32 = 208;
const FONT: &str = "Inter, Arial, sans-serif";

/// Everything the renderer reads.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub design: &'a Design,
    pub positions: &'a ElementPositions,
    pub background: Option<&'a ImageData>,
    pub dragging: Option<ElementId>,
}

impl<'a> RenderInput<'a> {
    pub fn new(design: &'a Design, positions: &'a ElementPositions, background: Option<&'a ImageData>) -> Self {
        Self {
            design,
            positions,
            background,
            dragging: None,
        }
    }

    pub fn with_dragging(mut self, dragging: Option<ElementId>) -> Self {
        self.dragging = dragging;
        self
    }
}

/// Both rendered faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFlyer {
    pub front: String,
    pub back: String,
}

impl RenderedFlyer {
    pub fn face(&self, face: Face) -> &str {
        match face {
            Face::Front => &self.front,
            Face::Back => &self.back,
        }
    }
}

/// Render one face as a standalone SVG document.
pub fn render_face(input: &RenderInput, face: Face) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="flyer-{}" width="{s}" height="{s}" viewBox="0 0 {s} {s}" font-family="{}">"#,
        face.as_str(),
        FONT,
        s = CANVAS_SIZE
    );

    background(&mut out, input.background);

    out.push_str(r#"<g class="draggable-layer">"#);
    for id in face.elements() {
        draggable(&mut out, input, id);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="fixed-layer" pointer-events="none">"#);
    match face {
        Face::Front => qr_block(&mut out, &input.design.qr_text),
        Face::Back => notes_panel(&mut out),
    }
    out.push_str("</g>");

    out.push_str("</svg>");
    out
}

fn background(out: &mut String, image: Option<&ImageData>) {
    match image {
        Some(data) => svg::image(out, data, CANVAS_SIZE, CANVAS_SIZE, "xMidYMid slice"),
        None => {
            let _ = write!(
                out,
                r#"<rect class="background" width="{s}" height="{s}" fill="{}"/>"#,
                DEFAULT_BACKGROUND,
                s = CANVAS_SIZE
            );
        }
    }
}

fn draggable(out: &mut String, input: &RenderInput, id: ElementId) {
    let position = input.positions.get(id);
    let dragging = input.dragging == Some(id);
    let transition = if dragging {
        Transition::None
    } else {
        Transition::Ease(IDLE_TRANSITION)
    };
    let _ = write!(
        out,
        r#"<g id="{}" class="draggable" transform="translate({} {})" style="cursor: {}; transition: {}">"#,
        id,
        position.x,
        position.y,
        if dragging { "grabbing" } else { "grab" },
        transition.css()
    );

    match id.slot() {
        Slot::Header => header(out, input.design),
        Slot::Logo => logo(out, input.design.uploaded_logo.as_ref()),
        Slot::Footer => footer(out, input.design),
    }

    out.push_str("</g>");
}

fn header(out: &mut String, design: &Design) {
    let _ = write!(
        out,
        r##"<text y="0" dominant-baseline="hanging" font-size="24" font-weight="800" fill="#FFFFFF">{}</text>"##,
        svg::escape(&design.title)
    );
    let _ = write!(
        out,
        r##"<text y="34" dominant-baseline="hanging" font-size="20" font-weight="300" fill="#FFFFFF">{} <tspan font-weight="700" fill="{}">{}</tspan></text>"##,
        svg::escape(&design.subtitle),
        ACCENT,
        svg::escape(&design.year)
    );
}

fn logo(out: &mut String, uploaded: Option<&ImageData>) {
    match uploaded {
        Some(data) => svg::image(out, data, LOGO_SIZE, LOGO_SIZE, "xMidYMid meet"),
        None => svg::hex_logo(out, LOGO_SIZE),
    }
}

fn footer(out: &mut String, design: &Design) {
    let center = FOOTER_WIDTH / 2;
    let _ = write!(
        out,
        r##"<text x="{}" y="0" text-anchor="middle" dominant-baseline="hanging" font-size="12" fill="#D1D5DB">{}</text>"##,
        center,
        svg::escape(&design.powered_by_text)
    );
    let _ = write!(
        out,
        r##"<text x="{}" y="18" text-anchor="middle" dominant-baseline="hanging" font-size="24" font-family="Arial, sans-serif" fill="#FFFFFF" xml:space="preserve"><tspan font-weight="700" font-style="italic">{}</tspan><tspan font-weight="300" dx="4">{}</tspan></text>"##,
        center,
        svg::escape(&design.logo_line1),
        svg::escape(&design.logo_line2)
    );
}

fn qr_block(out: &mut String, caption: &str) {
    let (x, y) = QR_ORIGIN;
    let inner = QR_TILE - 2 * QR_BORDER;
    let _ = write!(
        out,
        r##"<g class="qr" transform="translate({} {})"><rect width="{t}" height="{t}" rx="6" fill="#FFFFFF"/><g transform="translate({b} {b})">"##,
        x,
        y,
        t = QR_TILE,
        b = QR_BORDER
    );
    qr::qr_symbol(out, caption, inner);
    out.push_str("</g>");

    let _ = write!(
        out,
        r##"<text x="{}" y="{}" text-anchor="middle" font-size="12" fill="#E5E7EB">"##,
        QR_TILE / 2,
        QR_TILE + 12
    );
    for (i, line) in svg::wrap_words(caption, QR_CAPTION_CHARS).iter().enumerate() {
        let _ = write!(
            out,
            r#"<tspan x="{}" dy="{}">{}</tspan>"#,
            QR_TILE / 2,
            if i == 0 { 12 } else { 16 },
            svg::escape(line)
        );
    }
    out.push_str("</text></g>");
}

fn notes_panel(out: &mut String) {
    let x = (CANVAS_SIZE - NOTES_WIDTH) / 2;
    let y = (CANVAS_SIZE - NOTES_HEIGHT) / 2;
    let _ = write!(
        out,
        r##"<g class="notes"><rect x="{}" y="{}" width="{}" height="{}" rx="6" fill="#FFFFFF" fill-opacity="0.9"/><text x="{c}" y="{c}" text-anchor="middle" dominant-baseline="middle" font-size="14" font-weight="500" fill="#6B7280">Space for notes</text></g>"##,
        x,
        y,
        NOTES_WIDTH,
        NOTES_HEIGHT,
        c = CANVAS_SIZE / 2
    );
}
