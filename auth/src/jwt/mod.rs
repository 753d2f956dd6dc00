pub mod claims;
pub mod codec;
pub mod errors;
pub mod fingerprint;
pub mod handler;

pub use claims::TokenClaims;
pub use claims::TokenSubject;
pub use codec::IssuedToken;
pub use codec::TokenCodec;
pub use errors::JwtError;
pub use errors::TokenError;
pub use fingerprint::TokenFingerprint;
pub use handler::JwtHandler;
