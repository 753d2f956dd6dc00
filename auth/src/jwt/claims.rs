use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Identity a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: i64,
    pub email: String,
    pub app_id: i32,
}

/// Claims carried by an access token.
///
/// Timestamps are Unix seconds, as in RFC 7519.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// User identifier
    pub uid: i64,

    /// User email at issuance time
    pub email: String,

    /// Application the token is bound to
    pub app_id: i32,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl TokenClaims {
    /// Build claims for a subject, expiring `ttl` after `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - User and application the token identifies
    /// * `issued_at` - Issuance instant (truncated to whole seconds)
    /// * `ttl` - Token lifetime
    pub fn for_subject(subject: TokenSubject, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();

        Self {
            uid: subject.user_id,
            email: subject.email,
            app_id: subject.app_id,
            iat,
            exp: iat + ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Check if token is expired.
    ///
    /// A token is valid strictly before its expiry second.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
