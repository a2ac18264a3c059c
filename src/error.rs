use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while editing or exporting the canvas
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("Invalid canvas dimensions: {width}x{height} (allowed 1..={max})", max = crate::canvas::MAX_DIMENSION)]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No file path given")]
    EmptyPath,

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font unavailable: {0}")]
    Font(String),
}

/// Result type for canvas operations
pub type PaintResult<T> = Result<T, PaintError>;
