//! Error types for rendering.

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rasterizing or encoding an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    #[error("Cannot render an empty image")]
    EmptyImage,

    #[error("Invalid style: {0}")]
    InvalidStyle(String),
}
