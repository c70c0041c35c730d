//! # HTTP Studio Server
//!
//! Exposes a design session over HTTP: text edits, pointer events for the
//! draggable elements, uploads, background generation, rendering, export,
//! and submission.
//!
//! ## Usage
//!
//! ```bash
//! GEMINI_API_KEY=... flyerforge serve --listen 0.0.0.0:8080
//! ```
//!
//! Then open http://localhost:8080 in a browser to see the current design.

mod handlers;
mod state;

pub use state::AppState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::StudioConfig;
use crate::error::FlyerError;
use crate::studio::Studio;

/// Upload size limit (25MB).
const UPLOAD_LIMIT: usize = 25 * 1024 * 1024;

/// Build the router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::render::index))
        .route("/export", get(handlers::render::export))
        // Design API
        .route("/api/design", get(handlers::design::show))
        .route("/api/design/text", post(handlers::design::update_text))
        .route("/api/prompt", post(handlers::design::update_prompt))
        .route("/api/positions/reset", post(handlers::design::reset_positions))
        .route("/api/pointer/:face", post(handlers::design::pointer))
        .route("/api/error/dismiss", post(handlers::design::dismiss_error))
        // Images
        .route(
            "/api/logo",
            post(handlers::upload::logo).layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
        )
        .route(
            "/api/background",
            post(handlers::upload::background).layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
        )
        .route("/api/generate", post(handlers::generate::generate))
        .route(
            "/api/background/select/:index",
            post(handlers::generate::select),
        )
        // Rendering
        .route("/api/render/:face", get(handlers::render::face))
        // Submission
        .route("/api/save", post(handlers::submit::save))
        .route("/api/email", post(handlers::submit::email))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use flyerforge::{config::StudioConfig, server::serve};
///
/// # async fn example() -> Result<(), flyerforge::error::FlyerError> {
/// serve(StudioConfig::from_env()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: StudioConfig) -> Result<(), FlyerError> {
    let studio = Studio::from_config(&config)?;
    let app_state = Arc::new(AppState::new(config.clone(), studio));
    let app = router(app_state);

    log::info!("[server] flyerforge studio starting...");
    log::info!("[server] Listening on: {}", config.listen_addr);
    log::info!("[server] Generation endpoint: {}", config.generation_endpoint);
    log::info!(
        "[server] Open http://{}/ in your browser to preview",
        config.listen_addr
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            FlyerError::Transport(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| FlyerError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
