//! # Flyerforge - Flyer and Badge Design Studio
//!
//! Flyerforge edits a two-faced, 400×400 event flyer. It provides:
//!
//! - **Layout**: six draggable elements with pointer-driven drag surfaces
//! - **Rendering**: SVG for each face, plus a print-ready HTML export
//! - **Images**: center-cropped, rescaled background uploads and logo uploads
//! - **Generation**: text-to-image backgrounds with exponential backoff
//! - **Submission**: persist or email the finished design
//!
//! ## Quick Start
//!
//! ```
//! use flyerforge::{
//!     layout::Face,
//!     session::{Command, Session},
//!     design::TextField,
//! };
//!
//! let mut session = Session::new();
//! session.apply(Command::SetText(TextField::Title, "RustConf".to_string()))?;
//!
//! let svg = session.render_face(Face::Front);
//! assert!(svg.contains("RustConf"));
//!
//! # Ok::<(), flyerforge::error::FlyerError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Element identifiers and the coordinate model |
//! | [`drag`] | Pointer-driven drag state machine |
//! | [`design`] | Editable text and logo |
//! | [`render`] | SVG faces and HTML export |
//! | [`media`] | Image data URLs and background normalization |
//! | [`generate`] | Background generation client |
//! | [`submit`] | Persist and email client |
//! | [`session`] | Session state and commands |
//! | [`studio`] | Session plus clients, safe to share across tasks |
//! | [`server`] | HTTP API |
//! | [`transport`] | HTTP transport and sleep seams |
//! | [`config`] | Endpoints and credentials |
//! | [`error`] | Error types |

pub mod config;
pub mod design;
pub mod drag;
pub mod error;
pub mod generate;
pub mod layout;
pub mod media;
pub mod render;
pub mod server;
pub mod session;
pub mod studio;
pub mod submit;
pub mod transport;

// Re-exports for convenience
pub use config::StudioConfig;
pub use error::FlyerError;
pub use session::Session;
pub use studio::Studio;
