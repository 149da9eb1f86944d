use std::error::Error;
use thiserror::Error;
use uuid::Uuid;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not serve the request at all.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Human readable description of the failed operation.
        message: String,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A uniqueness constraint rejected the write.
    #[error("{message}")]
    Conflict {
        /// Which record collided.
        message: String,
    },
    /// A player referenced by a ledger operation does not exist.
    #[error("player `{name}` does not exist")]
    MissingPlayer {
        /// Name of the absent player.
        name: String,
    },
    /// A match referenced by a ledger operation does not exist.
    #[error("match `{id}` does not exist")]
    MissingMatch {
        /// Identifier of the absent match.
        id: Uuid,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
