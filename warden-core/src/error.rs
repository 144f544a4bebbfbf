//! Error types for the warden core library.

use thiserror::Error;

/// Top-level error type for all warden operations.
///
/// Per-message classification and moderation are infallible by design —
/// unmatched input resolves to defined fallbacks rather than errors — so
/// this enum only covers the configuration and I/O boundary.
#[derive(Error, Debug)]
pub enum WardenError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, WardenError>;
