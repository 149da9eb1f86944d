use mongodb::error::Error as MongoError;
use thiserror::Error;
use uuid::Uuid;

use crate::dao::storage::StorageError;

/// Result alias for the MongoDB backend.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Failures raised by the MongoDB storage backend.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection string could not be parsed.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// Offending URI.
        uri: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The client could not be constructed from parsed options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Initial connectivity check never succeeded.
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        /// How many pings were attempted.
        attempts: u32,
        /// Driver error from the last attempt.
        #[source]
        source: MongoError,
    },
    /// Health ping against an established connection failed.
    #[error("MongoDB ping health check failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Index creation failed.
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        /// Target collection.
        collection: &'static str,
        /// Index description.
        index: &'static str,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A client session could not be started for a transaction.
    #[error("failed to start MongoDB session")]
    StartSession {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A transaction could not be started, committed or aborted.
    #[error("failed to {action} MongoDB transaction")]
    Transaction {
        /// Which lifecycle step failed.
        action: &'static str,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Writing a player record failed.
    #[error("failed to save player `{name}`")]
    SavePlayer {
        /// Player name.
        name: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A player insert collided with the unique name index.
    #[error("player `{name}` already exists")]
    DuplicatePlayer {
        /// Colliding name.
        name: String,
    },
    /// Reading a player record failed.
    #[error("failed to load player `{name}`")]
    LoadPlayer {
        /// Player name.
        name: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Listing the player collection failed.
    #[error("failed to list players")]
    ListPlayers {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Deleting a player record failed.
    #[error("failed to delete player `{name}`")]
    DeletePlayer {
        /// Player name.
        name: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A ledger operation referenced a player absent from the collection.
    #[error("player `{name}` does not exist")]
    MissingPlayer {
        /// Absent player name.
        name: String,
    },
    /// Writing a match record failed.
    #[error("failed to save match `{id}`")]
    SaveMatch {
        /// Match id.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Reading a match record failed.
    #[error("failed to load match `{id}`")]
    LoadMatch {
        /// Match id.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Listing the match collection failed.
    #[error("failed to list matches")]
    ListMatches {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Deleting a match record failed.
    #[error("failed to delete match `{id}`")]
    DeleteMatch {
        /// Match id.
        id: Uuid,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A ledger operation referenced a match absent from the collection.
    #[error("match `{id}` does not exist")]
    MissingMatch {
        /// Absent match id.
        id: Uuid,
    },
    /// Running the leaderboard aggregations failed.
    #[error("failed to aggregate player leaderboards")]
    Leaderboards {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Writing an account record failed.
    #[error("failed to save user `{email}`")]
    SaveUser {
        /// Account email.
        email: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// An account insert collided with the unique email index.
    #[error("email `{email}` already in use")]
    DuplicateUser {
        /// Colliding email.
        email: String,
    },
    /// Reading an account record failed.
    #[error("failed to load user `{email}`")]
    LoadUser {
        /// Account email.
        email: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
}

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::MissingPlayer { name } => StorageError::MissingPlayer { name },
            MongoDaoError::MissingMatch { id } => StorageError::MissingMatch { id },
            MongoDaoError::DuplicatePlayer { name } => StorageError::Conflict {
                message: format!("player `{name}` already exists"),
            },
            MongoDaoError::DuplicateUser { email } => StorageError::Conflict {
                message: format!("email `{email}` already in use"),
            },
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}
