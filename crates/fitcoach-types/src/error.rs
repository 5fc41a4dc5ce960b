use thiserror::Error;

/// Errors from talking to the backend REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("not authorized")]
    Unauthorized,

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Backend-provided message, when there is one worth showing to the user.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Errors from the local key-value store (used by trait definitions in fitcoach-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors related to sign-in, registration and logout.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("not signed in")]
    NotSignedIn,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors related to plan viewing and editing.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("no plan has been generated yet")]
    NotGenerated,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors related to profile editing and progress tracking.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid progress entry: {0}")]
    InvalidEntry(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
