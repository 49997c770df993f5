use std::path::PathBuf;

use thiserror::Error;

use crate::observability::PipelineSeverity;

/// Convenience result type for enrichment operations.
pub type EnrichResult<T> = Result<T, EnrichError>;

/// Error type returned by loading, formatting and writing functions.
///
/// Whole-run failures (missing or malformed input documents, output I/O) and per-row failures
/// (`MissingField`, `ParseError`) share this enum. Row failures only come out of
/// [`crate::processing::format_record`], so the collection builder skips every error it sees.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// An input file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Underlying I/O error (permission denied, unreadable file, ...).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The delimited input could not be read.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be parsed.
    #[error("json decode error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The output collection could not be serialized.
    #[error("failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A document does not have the overall shape required to compute outputs.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A required cell is absent or empty.
    #[error("missing required field '{column}'")]
    MissingField { column: String },

    /// A cell could not be converted to its required type.
    #[error("failed to parse column '{column}': {message} (raw='{raw}')")]
    ParseError {
        column: String,
        raw: String,
        message: String,
    },
}

impl EnrichError {
    /// Severity used when the error is reported to a [`crate::observability::PipelineObserver`].
    pub fn severity(&self) -> PipelineSeverity {
        match self {
            EnrichError::NotFound { .. } | EnrichError::Io(_) => PipelineSeverity::Critical,
            EnrichError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => PipelineSeverity::Critical,
                _ => PipelineSeverity::Error,
            },
            EnrichError::Json { .. }
            | EnrichError::Serialize(_)
            | EnrichError::SchemaMismatch { .. }
            | EnrichError::MissingField { .. }
            | EnrichError::ParseError { .. } => PipelineSeverity::Error,
        }
    }
}
