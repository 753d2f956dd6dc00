use std::fmt;

use auth::HashingParams;
use chrono::Duration;

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Application unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId(pub i32);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registered user.
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Argon2id PHC string
    pub password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Client application allowed to request tokens.
///
/// Tokens issued for an application are signed with its secret.
#[derive(Clone)]
pub struct Application {
    pub id: AppId,
    pub name: String,
    pub secret: String,
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Construction-time settings of the auth service.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    pub token_ttl: Duration,
    pub hashing: HashingParams,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::hours(1),
            hashing: HashingParams::default(),
        }
    }
}

/// Canonical form of an email address for storage and lookup.
///
/// Emails compare case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
