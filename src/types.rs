//! Shared error type for the retrieval and ingestion pipelines.

use thiserror::Error;

/// Errors surfaced by the PregGo backend.
///
/// Every failure mode collapses to a generic `{"error": ...}` body with status
/// 500 at the HTTP boundary; the variants exist so the server-side logs and the
/// binaries can report what actually went wrong.
#[derive(Debug, Error)]
pub enum RagError {
    /// A hosted provider call (embedding or generation) failed.
    #[error("provider error: {0}")]
    Provider(String),

    /// The vector store rejected a read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// A source file could not be loaded during ingestion.
    #[error("failed to load {file}: {reason}")]
    Loader { file: String, reason: String },

    /// Configuration was missing or invalid at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// An inbound request was missing a required field.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RagError {
    fn from(err: reqwest::Error) -> Self {
        RagError::Provider(err.to_string())
    }
}

impl From<tokio_rusqlite::Error> for RagError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        RagError::Storage(err.to_string())
    }
}
