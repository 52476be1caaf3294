//! Error types for the upstream-core library.

/// Top-level error enum for the upstream-core library.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Grid error: {0}")]
    Grid(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
