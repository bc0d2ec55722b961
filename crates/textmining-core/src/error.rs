//! Error types for condition searches

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can end a search call
///
/// Every variant is terminal for the current call. Validation errors are
/// raised before any page is read or any sink is opened.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("File {} not found!", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Log path {} not found", .0.display())]
    LogPathNotFound(PathBuf),

    #[error("No conditions found in {0:?}")]
    InvalidCondition(String),

    #[error("Failed to write report to {}: {source}", .path.display())]
    SinkWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Failed to persist search counter at {}: {source}", .path.display())]
    CounterFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SearchError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            SearchError::LogPathNotFound(_) => "LOG_PATH_NOT_FOUND",
            SearchError::InvalidCondition(_) => "INVALID_CONDITION",
            SearchError::SinkWriteFailure { .. } => "SINK_WRITE_FAILURE",
            SearchError::ExtractionFailed(_) => "EXTRACTION_FAILED",
            SearchError::CounterFailure { .. } => "COUNTER_FAILURE",
        }
    }
}
