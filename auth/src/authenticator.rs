use std::future::Future;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenClaims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::jwt::TokenSubject;
use crate::password::HashingParams;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Password operations are CPU-bound and synchronous; async callers should run
/// them on a blocking thread.
#[derive(Debug)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `hashing` - Argon2 cost parameters
    /// * `token_ttl` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `InvalidParams` - Hashing parameters are rejected by Argon2
    /// * `HashingFailed` - The timing-equalization hash could not be computed
    pub fn new(hashing: HashingParams, token_ttl: Duration) -> Result<Self, PasswordError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_params(hashing)?,
            token_codec: TokenCodec::new(token_ttl),
        })
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_codec.ttl()
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against the stored hash of an account.
    ///
    /// `stored_hash` is `None` when no account exists; a dummy verification
    /// still runs so both failures cost the same time and yield the same error.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No account, or password does not match
    /// * `PasswordError` - Stored hash is corrupted
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash)?,
            None => self.password_hasher.verify_dummy(password)?,
        };

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(())
    }

    /// Sign a token for an authenticated subject.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        subject: TokenSubject,
        secret: &[u8],
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        self.token_codec.issue(subject, secret, now)
    }

    /// Parse token claims without trusting them.
    pub fn inspect_token(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.token_codec.inspect(token)
    }

    /// Validate a token's signature and expiry.
    ///
    /// See [`TokenCodec::verify`].
    pub async fn validate_token<F, Fut, S, E>(
        &self,
        token: &str,
        now: DateTime<Utc>,
        lookup: F,
    ) -> Result<TokenClaims, TokenError<E>>
    where
        F: FnOnce(i32) -> Fut,
        Fut: Future<Output = Result<S, E>>,
        S: AsRef<[u8]>,
    {
        self.token_codec.verify(token, now, lookup).await
    }
}
