//! Authentication utilities library
//!
//! Provides the credential and token primitives of the SSO service:
//! - Password hashing (Argon2id) with tunable cost
//! - Per-application HS256 access tokens with an explicit TTL
//! - Token fingerprints for revocation
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new().unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{TokenCodec, TokenSubject};
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(Duration::hours(1));
//! let subject = TokenSubject { user_id: 1, email: "a@x.com".to_string(), app_id: 42 };
//! let issued = codec.issue(subject, b"app-secret", Utc::now()).unwrap();
//! let claims = codec.inspect(&issued.token).unwrap();
//! assert_eq!(claims.app_id, 42);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenFingerprint;
pub use jwt::TokenSubject;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
