use async_trait::async_trait;
use auth::TokenClaims;
use auth::TokenFingerprint;
use chrono::DateTime;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::errors::RevocationError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;

/// Port for authentication domain service operations.
///
/// Every operation is bounded by `cancel`: once it fires the operation returns
/// `Cancelled` at its next suspension point.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token for an application.
    ///
    /// # Arguments
    /// * `email` - Account email (case-insensitive)
    /// * `password` - Plaintext password
    /// * `app_id` - Application requesting the token
    /// * `cancel` - Caller cancellation signal
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `UnknownApplication` - Application is not registered
    /// * `StorageUnavailable` - Repository failure
    /// * `Cancelled` - Cancellation fired
    async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
        cancel: &CancellationToken,
    ) -> Result<String, AuthError>;

    /// Register a new user.
    ///
    /// # Returns
    /// Identifier of the new user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `StorageUnavailable` - Repository failure
    /// * `Cancelled` - Cancellation fired
    async fn register_new_user(
        &self,
        email: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<UserId, AuthError>;

    /// Check whether a user holds an admin grant.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `StorageUnavailable` - Repository failure
    /// * `Cancelled` - Cancellation fired
    async fn is_admin(&self, user_id: UserId, cancel: &CancellationToken)
        -> Result<bool, AuthError>;

    /// Revoke a token until its natural expiry.
    ///
    /// Idempotent; logging out an already expired token is a no-op.
    ///
    /// # Errors
    /// * `MalformedToken` - Token cannot be parsed
    /// * `StorageUnavailable` - Revocation store failure
    /// * `Cancelled` - Cancellation fired
    async fn logout(&self, token: &str, cancel: &CancellationToken) -> Result<(), AuthError>;

    /// Verify a token presented to a protected call.
    ///
    /// # Returns
    /// Verified token claims
    ///
    /// # Errors
    /// * `MalformedToken` - Token cannot be parsed
    /// * `InvalidToken` - Signature does not verify
    /// * `TokenExpiredOrRevoked` - Token expired or logged out
    /// * `UnknownApplication` - Token names an unregistered application
    /// * `StorageUnavailable` - Repository or revocation store failure
    /// * `Cancelled` - Cancellation fired
    async fn validate_token(
        &self,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<TokenClaims, AuthError>;
}

/// Storage operations for users, applications and admin grants.
///
/// Dropping a returned future aborts the call.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Arguments
    /// * `email` - Normalized email address
    /// * `password_hash` - Password hash in PHC string format
    ///
    /// # Returns
    /// Identifier assigned by storage
    ///
    /// # Errors
    /// * `Conflict` - Email is already registered
    /// * `Unavailable` - Storage operation failed
    async fn save_user(&self, email: &str, password_hash: &str) -> Result<UserId, RepositoryError>;

    /// Retrieve user by normalized email.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `Unavailable` - Storage operation failed
    async fn find_user_by_email(&self, email: &str) -> Result<User, RepositoryError>;

    /// Check the admin relation for a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Unavailable` - Storage operation failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, RepositoryError>;

    /// Retrieve application by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Application is not registered
    /// * `Unavailable` - Storage operation failed
    async fn find_application(&self, app_id: AppId) -> Result<Application, RepositoryError>;
}

/// Set of logged-out tokens, kept until each token's own expiry.
#[async_trait]
pub trait RevocationStore: Send + Sync + 'static {
    /// Record a token as revoked until `expires_at`. Idempotent.
    ///
    /// # Errors
    /// * `Unavailable` - Store cannot be reached
    async fn revoke(
        &self,
        fingerprint: TokenFingerprint,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RevocationError>;

    /// Check whether an unexpired revocation exists for a token.
    ///
    /// # Errors
    /// * `Unavailable` - Store cannot be reached
    async fn is_revoked(&self, fingerprint: &TokenFingerprint) -> Result<bool, RevocationError>;
}
