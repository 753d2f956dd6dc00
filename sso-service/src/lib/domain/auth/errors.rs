use thiserror::Error;

/// Semantic outcome of a failed identity repository call.
///
/// Adapters translate driver-specific errors into this closed set; the domain
/// never sees storage error codes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Record conflicts with an existing one")]
    Conflict,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Error for revocation store operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RevocationError {
    #[error("Revocation store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for all authentication operations.
///
/// Messages never include passwords, tokens or signing secrets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    // Domain-level errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Unknown application")]
    UnknownApplication,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token signature")]
    InvalidToken,

    #[error("Token expired or revoked")]
    TokenExpiredOrRevoked,

    // Infrastructure errors
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RevocationError> for AuthError {
    fn from(err: RevocationError) -> Self {
        match err {
            RevocationError::Unavailable(reason) => AuthError::StorageUnavailable(reason),
        }
    }
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => AuthError::Internal(e.to_string()),
        }
    }
}
