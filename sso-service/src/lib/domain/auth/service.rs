use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenClaims;
use auth::TokenError;
use auth::TokenFingerprint;
use auth::TokenSubject;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::models::normalize_email;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Application;
use crate::domain::auth::models::AuthServiceConfig;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::IdentityRepository;
use crate::domain::auth::ports::RevocationStore;

/// Domain service implementation for authentication operations.
///
/// Holds no per-request state; the only mutable state it touches lives in the
/// repository and the revocation store.
pub struct AuthService<IR, RS>
where
    IR: IdentityRepository,
    RS: RevocationStore,
{
    repository: Arc<IR>,
    revocation_store: Arc<RS>,
    authenticator: Arc<Authenticator>,
}

impl<IR, RS> AuthService<IR, RS>
where
    IR: IdentityRepository,
    RS: RevocationStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `revocation_store` - Logged-out token tracking
    /// * `config` - Token TTL and hashing cost
    ///
    /// # Errors
    /// * `Internal` - Hashing parameters are invalid
    pub fn new(
        repository: Arc<IR>,
        revocation_store: Arc<RS>,
        config: AuthServiceConfig,
    ) -> Result<Self, AuthError> {
        let authenticator = Authenticator::new(config.hashing, config.token_ttl)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(Self {
            repository,
            revocation_store,
            authenticator: Arc::new(authenticator),
        })
    }

    /// Run CPU-heavy password work off the async executor.
    async fn blocking<T, F>(&self, work: F) -> Result<T, AuthError>
    where
        F: FnOnce(&Authenticator) -> Result<T, AuthError> + Send + 'static,
        T: Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || work(&authenticator))
            .await
            .map_err(|e| AuthError::Internal(format!("Password task failed: {}", e)))?
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, AuthError> {
        match self.repository.find_user_by_email(email).await {
            Ok(user) => Ok(Some(user)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(e) => Err(storage_error(e)),
        }
    }

    async fn find_application(&self, app_id: AppId) -> Result<Application, AuthError> {
        self.repository
            .find_application(app_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::UnknownApplication,
                other => storage_error(other),
            })
    }
}

/// Race an operation step against the caller's cancellation signal.
async fn guarded<T, F>(cancel: &CancellationToken, operation: F) -> Result<T, AuthError>
where
    F: Future<Output = Result<T, AuthError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AuthError::Cancelled),
        result = operation => result,
    }
}

fn storage_error(err: RepositoryError) -> AuthError {
    match err {
        RepositoryError::Unavailable(reason) => {
            tracing::error!(error = %reason, "Identity storage unavailable");
            AuthError::StorageUnavailable(reason)
        }
        // Callers translate the outcomes they expect; anything else is a contract breach.
        other => AuthError::Internal(format!("Unexpected repository outcome: {}", other)),
    }
}

#[async_trait]
impl<IR, RS> AuthServicePort for AuthService<IR, RS>
where
    IR: IdentityRepository,
    RS: RevocationStore,
{
    async fn login(
        &self,
        email: &str,
        password: &str,
        app_id: AppId,
        cancel: &CancellationToken,
    ) -> Result<String, AuthError> {
        let email = normalize_email(email);

        let user = guarded(cancel, self.find_user(&email)).await?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let password = password.to_owned();
        let verification = guarded(
            cancel,
            self.blocking(move |authenticator| {
                authenticator
                    .verify_credentials(&password, stored_hash.as_deref())
                    .map_err(AuthError::from)
            }),
        )
        .await;

        let user = match (verification, user) {
            (Ok(()), Some(user)) => user,
            (Ok(()), None) | (Err(AuthError::InvalidCredentials), _) => {
                tracing::info!(app_id = %app_id, "Login rejected: invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
            (Err(e), _) => return Err(e),
        };

        let application = guarded(cancel, self.find_application(app_id)).await?;

        let issued = self
            .authenticator
            .issue_token(
                TokenSubject {
                    user_id: user.id.0,
                    email: user.email.clone(),
                    app_id: application.id.0,
                },
                application.secret.as_bytes(),
                Utc::now(),
            )
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        tracing::info!(
            user_id = %user.id,
            app_id = %application.id,
            "User logged in"
        );

        Ok(issued.token)
    }

    async fn register_new_user(
        &self,
        email: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<UserId, AuthError> {
        let email = normalize_email(email);

        let password = password.to_owned();
        let password_hash = guarded(
            cancel,
            self.blocking(move |authenticator| {
                authenticator
                    .hash_password(&password)
                    .map_err(|e| AuthError::Internal(e.to_string()))
            }),
        )
        .await?;

        let user_id = guarded(cancel, async {
            self.repository
                .save_user(&email, &password_hash)
                .await
                .map_err(|e| match e {
                    RepositoryError::Conflict => AuthError::UserAlreadyExists,
                    other => storage_error(other),
                })
        })
        .await
        .map_err(|e| {
            if e == AuthError::UserAlreadyExists {
                tracing::info!("Registration rejected: user already exists");
            }
            e
        })?;

        tracing::info!(user_id = %user_id, "User registered");

        Ok(user_id)
    }

    async fn is_admin(
        &self,
        user_id: UserId,
        cancel: &CancellationToken,
    ) -> Result<bool, AuthError> {
        let is_admin = guarded(cancel, async {
            self.repository
                .is_admin(user_id)
                .await
                .map_err(|e| match e {
                    RepositoryError::NotFound => AuthError::UserNotFound,
                    other => storage_error(other),
                })
        })
        .await?;

        tracing::debug!(user_id = %user_id, is_admin, "Checked admin grant");

        Ok(is_admin)
    }

    async fn logout(&self, token: &str, cancel: &CancellationToken) -> Result<(), AuthError> {
        let claims = self
            .authenticator
            .inspect_token(token)
            .map_err(|_| AuthError::MalformedToken)?;

        let now = Utc::now();
        if claims.is_expired(now) {
            tracing::debug!(user_id = claims.uid, "Logout of expired token ignored");
            return Ok(());
        }

        // A genuine token never outlives the TTL, so forged expiries are capped.
        let retain_until = claims
            .expires_at()
            .min(now + self.authenticator.token_ttl());

        guarded(cancel, async {
            self.revocation_store
                .revoke(TokenFingerprint::of(token), retain_until)
                .await
                .map_err(AuthError::from)
        })
        .await?;

        tracing::info!(
            user_id = claims.uid,
            app_id = claims.app_id,
            "Token revoked"
        );

        Ok(())
    }

    async fn validate_token(
        &self,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<TokenClaims, AuthError> {
        let claims = self
            .authenticator
            .validate_token(token, Utc::now(), |app_id| async move {
                guarded(cancel, self.find_application(AppId(app_id)))
                    .await
                    .map(|application| application.secret)
            })
            .await
            .map_err(|e| match e {
                TokenError::Malformed(_) => AuthError::MalformedToken,
                TokenError::InvalidSignature => AuthError::InvalidToken,
                TokenError::Expired => AuthError::TokenExpiredOrRevoked,
                TokenError::Lookup(e) => e,
            })?;

        let fingerprint = TokenFingerprint::of(token);
        let revoked = guarded(cancel, async {
            self.revocation_store
                .is_revoked(&fingerprint)
                .await
                .map_err(AuthError::from)
        })
        .await?;

        if revoked {
            tracing::debug!(user_id = claims.uid, "Rejected revoked token");
            return Err(AuthError::TokenExpiredOrRevoked);
        }

        Ok(claims)
    }
}
