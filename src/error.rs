use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop an ingest run. Parse-time errors abort the run
/// before any write is attempted; load-time errors leave the destination
/// table in its pre-run state.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The source file could not be opened or read.
    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row does not fit the expected 5-column schema.
    #[error("schema mismatch at line {line}: {reason}")]
    SchemaMismatch { line: usize, reason: String },

    /// The relational store could not be reached before writing.
    #[error("connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// The store was reachable but rejected the write.
    #[error("write failed: {0}")]
    WriteFailed(#[source] sqlx::Error),
}
