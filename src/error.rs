use thiserror::Error;

/// Errors raised by the scoring and export engine.
#[derive(Debug, Error)]
pub enum ScorecardError {
    /// Raw factor weights were non-positive, non-finite, or all zero.
    #[error("invalid weights: {0}")]
    InvalidWeight(String),

    /// An export record carried a rating, weight, or score that cannot be exported.
    #[error("invalid export data: {0}")]
    InvalidExportData(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ScorecardError> = std::result::Result<T, E>;
