//! Error types for camera-ui operations.

use std::path::PathBuf;

/// All errors that can occur in camera-ui operations.
///
/// Every controller path converts these into a status message; nothing here
/// is fatal to the UI.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    // ─────────────────────────────────────────────────────────────────────
    // Transport Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid server URL: {0}")]
    InvalidServerUrl(String),

    // ─────────────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Invalid capture duration: {0:?}")]
    InvalidDuration(String),

    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration read failed: {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    // ─────────────────────────────────────────────────────────────────────
    // Runtime Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Event channel closed")]
    ChannelClosed,

    #[error("Failed to spawn request worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

/// Convenience type alias for Results using UiError.
pub type Result<T> = std::result::Result<T, UiError>;
