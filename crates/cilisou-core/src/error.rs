//! Error types for the cilisou gateway core
//!
//! Validation of inbound request parameters happens in the transport
//! shell, so the core only models failures of the pipeline itself.

use std::time::Duration;

use thiserror::Error;

/// Error type for the mirror-resolution backend
///
/// Kept separate from [`GatewayError`] so alternative backends only
/// need to speak this vocabulary.
#[derive(Error, Debug)]
pub enum MirrorError {
    /// Browser session could not be started or attached
    #[error("Failed to start browser session: {0}")]
    Session(String),

    /// Navigation to the seed address failed
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// The browser completed navigation but reported no final address
    #[error("Browser did not report a final address")]
    NoFinalAddress,
}

/// Error type for all gateway pipeline operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Client called again inside the cooldown window
    #[error("Rate limited - retry in {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// Mirror resolution failed; the cached mirror is left untouched
    #[error("Mirror resolution failed: {0}")]
    Resolution(#[from] MirrorError),

    /// Listing request failed at the transport level
    #[error("Listing request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Listing request completed with a non-success status
    #[error("Listing request returned status {0}")]
    FetchStatus(reqwest::StatusCode),

    /// Failed to parse listing HTML
    #[error("Failed to parse HTML: {0}")]
    Parse(String),
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
