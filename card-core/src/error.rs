//! Error types for card editor operations.

use thiserror::Error;

/// Result type for card editor operations.
pub type CardResult<T> = Result<T, CardError>;

/// Errors that can occur in the card editor core.
#[derive(Debug, Error)]
pub enum CardError {
    /// Input rejected before it could change the scene.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Scene serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
