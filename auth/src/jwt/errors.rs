use std::fmt;

use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,
}

/// Error type for full token verification.
///
/// Generic over the error produced by the caller's secret lookup so lookup
/// failures (unknown application, storage outage) pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError<E> {
    /// Token could not be parsed or decoded
    Malformed(String),

    /// Signature does not verify under the application's current secret
    InvalidSignature,

    /// Token expiry is in the past
    Expired,

    /// The secret lookup failed
    Lookup(E),
}

impl<E> From<JwtError> for TokenError<E> {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidSignature => TokenError::InvalidSignature,
            JwtError::Malformed(reason) | JwtError::EncodingFailed(reason) => {
                TokenError::Malformed(reason)
            }
        }
    }
}

impl<E: fmt::Display> fmt::Display for TokenError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Malformed(reason) => write!(f, "Token is malformed: {}", reason),
            TokenError::InvalidSignature => write!(f, "Token signature is invalid"),
            TokenError::Expired => write!(f, "Token is expired"),
            TokenError::Lookup(err) => write!(f, "Secret lookup failed: {}", err),
        }
    }
}

impl<E> std::error::Error for TokenError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TokenError::Lookup(err) => Some(err),
            _ => None,
        }
    }
}
