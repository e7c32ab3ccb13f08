//! Error types for slide import.
//!
//! Normalization itself never fails; these errors only cover reading the
//! export document before any record is normalized.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading an export document.
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not valid JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The top-level JSON value cannot hold slides.
    #[error("Invalid export document: {0}")]
    InvalidDocument(String),
}
