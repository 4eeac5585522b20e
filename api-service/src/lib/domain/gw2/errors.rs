use thiserror::Error;

/// Error for `ids` query parameter validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdListError {
    #[error("ids contains an empty entry")]
    EmptyEntry,

    #[error("ids entry is not a valid numeric id: {0}")]
    InvalidNumber(String),
}

/// Errors raised while proxying a request to the game-data API.
#[derive(Debug, Clone, Error)]
pub enum Gw2Error {
    // Caller input
    #[error("Invalid ids: {0}")]
    InvalidIds(#[from] IdListError),

    #[error("An API key is required for this resource")]
    MissingApiKey,

    // Upstream failures
    #[error("Upstream request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("Upstream request to {path} timed out")]
    Timeout { path: String },

    #[error("Upstream returned status {status} for {path}")]
    UpstreamStatus { status: u16, path: String },

    #[error("Upstream returned an unreadable body for {path}: {message}")]
    InvalidBody { path: String, message: String },

    // Infrastructure
    #[error("Invalid upstream configuration: {0}")]
    Configuration(String),
}
