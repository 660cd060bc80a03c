use thiserror::Error;

/// A message-bearing rejection from the external execution backend.
///
/// The engine has no knowledge of how the backend is implemented; it only
/// needs failures to carry a human-readable message, which the resolver
/// copies into the failing node's `error` field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors surfaced by the persistence layer.
///
/// A failed save must never report success, so store failures propagate to
/// the caller instead of being swallowed. Graph mutation itself is total
/// and has no error type.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Storage backend failed: {0}")]
    Store(String),

    #[error("Stored data could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
