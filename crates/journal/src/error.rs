//! Error taxonomy for the mood journal core.
//!
//! Every variant carries a human-readable message naming the operation that
//! failed so the caller can surface it without further context.  Nothing in
//! the core retries; each error is reported exactly once.

use thiserror::Error;

/// Result type alias for journal operations.
pub type JournalResult<T> = Result<T, JournalError>;

#[derive(Error, Debug)]
pub enum JournalError {
    /// Input rejected before any side effect took place.
    #[error("validation error: {0}")]
    Validation(String),

    /// The classifier failed; no entry was persisted.
    #[error("classification failed: {0}")]
    Classification(String),

    /// The summarizer failed; only the summary section is affected.
    #[error("summary failed: {0}")]
    Summary(String),

    /// The entry log could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The journal was composed but could not be delivered.
    #[error("dispatch failed: {0}")]
    Dispatch(String),

    /// Voice capture produced no usable transcript.
    #[error("transcription failed: {0}")]
    Transcription(String),
}

impl JournalError {
    pub(crate) fn persistence(op: &str, path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Persistence(format!("{op} {}: {err}", path.display()))
    }
}
