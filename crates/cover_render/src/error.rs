//! Error types for cover rendering

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cover page region not found")]
    RegionNotFound,

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Font unavailable: {0}")]
    FontUnavailable(String),

    #[error("Font loading failed: {0}")]
    FontLoad(String),

    #[error("Logo could not be loaded: {0}")]
    Logo(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The raster could not be encoded as an image
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("PNG encoding failed: {0}")]
    Png(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
