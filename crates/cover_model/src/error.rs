//! Error types for the cover model

use crate::FieldName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// One or more required fields were empty at export time.
///
/// `missing` is always in the declared order of [`FieldName::REQUIRED`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in the following required fields:\n• {}", labels(.missing))]
pub struct ValidationError {
    pub missing: Vec<FieldName>,
}

impl ValidationError {
    /// Human-readable names of the missing fields
    pub fn missing_labels(&self) -> Vec<&'static str> {
        self.missing.iter().map(FieldName::label).collect()
    }
}

fn labels(missing: &[FieldName]) -> String {
    missing
        .iter()
        .map(FieldName::label)
        .collect::<Vec<_>>()
        .join("\n• ")
}
