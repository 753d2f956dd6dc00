use std::fmt;

use sha2::Digest;
use sha2::Sha256;

/// Stable identity of a token for revocation purposes.
///
/// Lowercase hex SHA-256 of the full token string, so the raw bearer token
/// never needs to be kept around after a single call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenFingerprint(String);

impl TokenFingerprint {
    pub fn of(token: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(TokenFingerprint::of("a.b.c"), TokenFingerprint::of("a.b.c"));
        assert_ne!(TokenFingerprint::of("a.b.c"), TokenFingerprint::of("a.b.d"));
    }

    #[test]
    fn test_fingerprint_format() {
        let fingerprint = TokenFingerprint::of("");
        assert_eq!(
            fingerprint.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
