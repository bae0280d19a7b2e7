//! Error types for the export pipeline

use cover_model::ValidationError;
use cover_render::{EncodeError, RenderError};
use store::pdf::PdfError;
use store::StoreError;
use thiserror::Error;

/// A failure after rasterization: encoding, assembly, or saving
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Image encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("Saving failed: {0}")]
    Save(#[from] StoreError),

    #[error("Export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Why an export did not produce a file, tagged by stage
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("An export is already in progress")]
    InFlight,
}

impl PipelineError {
    /// Stage tag: "validation", "render", "export" or "in-flight"
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "validation",
            PipelineError::Render(_) => "render",
            PipelineError::Export(_) => "export",
            PipelineError::InFlight => "in-flight",
        }
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(err: tokio::task::JoinError) -> Self {
        PipelineError::Export(ExportError::Task(err))
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
