//! Error taxonomy for the preparation and analysis pipeline.
//!
//! Every variant is raised synchronously at the point of violation. Callers
//! decide whether to degrade (e.g. show "not enough data") or abort.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by the core pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A field is missing, unexpected, or of the wrong kind for the operation.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A label was not seen when the field's encoder was fitted.
    #[error("Unknown label '{label}' for field '{field}'")]
    UnknownLabel { field: String, label: String },

    /// A code lies outside `[0, k)` for the field's encoder.
    #[error("Unknown code {code} for field '{field}'")]
    UnknownCode { field: String, code: u32 },

    /// A numeric column has zero variance and cannot be standardized.
    #[error("Column '{field}' has zero variance and cannot be standardized")]
    DegenerateColumn { field: String },

    /// Too few rows or classes for the requested computation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Failure inside the underlying column storage.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl PipelineError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        PipelineError::Schema(message.into())
    }

    pub(crate) fn insufficient(message: impl Into<String>) -> Self {
        PipelineError::InsufficientData(message.into())
    }

    /// True for errors a presentation layer should show as "not enough data".
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, PipelineError::InsufficientData(_))
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
