//! # Error Types
//!
//! This module defines error types used throughout the flyerforge library.
//!
//! The `Display` text of each variant doubles as the inline banner shown to
//! the user, so messages are written to be read by a person.

use thiserror::Error;

/// Main error type for flyerforge operations
#[derive(Debug, Error)]
pub enum FlyerError {
    /// Input rejected before any network attempt (blank prompt, blank address)
    #[error("{0}")]
    Validation(String),

    /// Remote service answered with a non-success status
    #[error("{message}")]
    Service { status: u16, message: String },

    /// Generation produced nothing usable
    #[error("{0}")]
    Generation(String),

    /// Transport-level errors (connection, TLS, timeouts)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// An operation of the same kind is already in flight
    #[error("{0} already in progress")]
    Busy(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlyerError {
    /// True for errors raised locally before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, FlyerError::Validation(_))
    }
}
