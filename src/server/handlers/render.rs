//! Rendering handlers: preview page, print export and per-face SVG.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::layout::Face;
use crate::render::export::export_document;

use super::super::state::AppState;

/// GET / - both faces on one page.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.studio.session().await;
    Html(export_document(&session.render(), &session.design().title, false))
}

/// GET /export - same page, opening the print dialog on load.
pub async fn export(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.studio.session().await;
    Html(export_document(&session.render(), &session.design().title, true))
}

/// GET /api/render/:face - one face as SVG.
pub async fn face(State(state): State<Arc<AppState>>, Path(face): Path<String>) -> Response {
    let face: Face = match face.parse() {
        Ok(face) => face,
        Err(e) => return (StatusCode::NOT_FOUND, e).into_response(),
    };
    let svg = state.studio.session().await.render_face(face);
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
}
