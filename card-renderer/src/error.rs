//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rasterizing or exporting a scene.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The pixel surface could not be created.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Bitmap bytes could not be decoded as an image.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Encoding or writing the export output failed.
    #[error("Export failed: {0}")]
    Export(String),
}
