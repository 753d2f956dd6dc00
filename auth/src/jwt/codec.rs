use std::future::Future;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::TokenClaims;
use super::claims::TokenSubject;
use super::errors::JwtError;
use super::errors::TokenError;
use super::handler::JwtHandler;

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

/// Issues and verifies access tokens bound to a per-application secret.
///
/// The codec holds no secrets itself. Each call receives the signing secret
/// (issue) or a lookup resolving the secret of the application named in the
/// token (verify), so rotating an application's secret invalidates all of its
/// tokens immediately.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec issuing tokens valid for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `subject` under the application's secret.
    ///
    /// # Arguments
    /// * `subject` - User and application identity
    /// * `secret` - Signing secret of `subject.app_id`
    /// * `issued_at` - Issuance instant, expiry is `issued_at + ttl`
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: TokenSubject,
        secret: &[u8],
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = TokenClaims::for_subject(subject, issued_at, self.ttl);
        let token = JwtHandler::new(secret).encode(&claims)?;

        Ok(IssuedToken { token, claims })
    }

    /// Read claims without checking signature or expiry.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    pub fn inspect(&self, token: &str) -> Result<TokenClaims, JwtError> {
        JwtHandler::decode_unverified(token)
    }

    /// Verify a token at instant `now`.
    ///
    /// `lookup` resolves the current secret of the application the token claims
    /// to belong to. It is only called for structurally valid tokens.
    ///
    /// # Errors
    /// * `Malformed` - Token cannot be parsed
    /// * `Lookup` - Secret lookup failed
    /// * `InvalidSignature` - Signature does not verify under the secret
    /// * `Expired` - `now` is at or past the token expiry
    pub async fn verify<F, Fut, S, E>(
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
        let unverified = self.inspect(token)?;

        let secret = lookup(unverified.app_id)
            .await
            .map_err(TokenError::Lookup)?;

        let claims: TokenClaims = JwtHandler::new(secret.as_ref()).decode(token)?;

        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
