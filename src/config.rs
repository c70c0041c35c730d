//! # Studio Configuration
//!
//! Endpoints and credentials used by the studio, read from the environment
//! and optionally overridden from the command line.
//!
//! ## Environment
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `GEMINI_API_KEY` | credential for the generation endpoint | empty |
//! | `FLYER_GENERATION_URL` | image generation `:predict` endpoint | Imagen 3 |
//! | `FLYER_SAVE_URL` | persist-design endpoint | placeholder backend |
//! | `FLYER_EMAIL_URL` | send-email endpoint | placeholder backend |
//! | `FLYER_LISTEN` | HTTP listen address | `127.0.0.1:8080` |
//!
//! A missing API key is not an error at startup: the generation service
//! rejects the request and the failure is reported like any other.
//!
//! ## Usage
//!
//! ```
//! use flyerforge::config::StudioConfig;
//!
//! let config = StudioConfig::default();
//! assert!(config.generation_url().contains("?key="));
//! ```

use std::env;

pub const DEFAULT_GENERATION_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/imagen-3.0-generate-002:predict";
pub const DEFAULT_SAVE_ENDPOINT: &str = "https://your-backend-api.com/api/save-design";
pub const DEFAULT_EMAIL_ENDPOINT: &str = "https://your-backend-api.com/api/send-flyer";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Runtime configuration for the studio and its remote collaborators.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Address the HTTP server binds to (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Base URL of the image generation endpoint (without the key)
    pub generation_endpoint: String,
    /// API key appended to the generation endpoint
    pub api_key: String,
    /// Persist-design endpoint
    pub save_endpoint: String,
    /// Send-email endpoint
    pub email_endpoint: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            generation_endpoint: DEFAULT_GENERATION_ENDPOINT.to_string(),
            api_key: String::new(),
            save_endpoint: DEFAULT_SAVE_ENDPOINT.to_string(),
            email_endpoint: DEFAULT_EMAIL_ENDPOINT.to_string(),
        }
    }
}

impl StudioConfig {
    /// Build a configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: env_or("FLYER_LISTEN", defaults.listen_addr),
            generation_endpoint: env_or("FLYER_GENERATION_URL", defaults.generation_endpoint),
            api_key: env_or("GEMINI_API_KEY", defaults.api_key),
            save_endpoint: env_or("FLYER_SAVE_URL", defaults.save_endpoint),
            email_endpoint: env_or("FLYER_EMAIL_URL", defaults.email_endpoint),
        }
    }

    /// Full generation URL including the credential query parameter.
    pub fn generation_url(&self) -> String {
        format!("{}?key={}", self.generation_endpoint, self.api_key)
    }

    /// Whether a credential was supplied at all.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn env_or(name: &str, fallback: String) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(fallback)
}
