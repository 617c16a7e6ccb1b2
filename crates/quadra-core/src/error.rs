//! Error types for the quadra classification engine.

use thiserror::Error;

/// Result type alias using quadra's Error type by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Core error type for quadra operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// Semantic search operation failed
    #[error("Search error: {0}")]
    Search(String),

    /// Both classifiers were unavailable for a note
    #[error("Classifiers unavailable: {0}")]
    ClassifiersUnavailable(String),

    /// Folder naming failed
    #[error("Naming error: {0}")]
    Naming(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

/// Recoverable failure of a single classifier adapter.
///
/// Unavailability is data, not control flow: each adapter returns
/// `Result<Verdict, Unavailable>` and the decision maker runs an explicit
/// fallback chain. None of these variants ever abort a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// Wall-clock timeout elapsed before the backend answered.
    #[error("timed out after {0}s")]
    Timeout(u64),

    /// Response contained no parseable JSON object.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Vector index returned zero neighbors.
    #[error("vector index returned no neighbors")]
    EmptyIndex,

    /// Backend reported an error (connection refused, HTTP 5xx, ...).
    #[error("backend error: {0}")]
    Backend(String),
}
