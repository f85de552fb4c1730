//! Session token utilities using HS256.
//!
//! Admin sessions are represented by short-lived JWTs signed with a shared
//! secret from configuration. There is a single token type; the admin
//! surface has no refresh-token flow.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for session token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the admin username.
    pub sub: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
}

/// Signs and verifies admin session tokens.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Session lifetime in seconds.
    pub expiry_secs: i64,
    /// Clock-skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("expiry_secs", &self.expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer from the shared secret.
    pub fn new(secret: &str, expiry_secs: i64, leeway_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
            leeway_secs,
        }
    }

    /// Issues a session token for the given admin username.
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: username.to_string(),
            exp: (now + Duration::seconds(self.expiry_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }

    /// Verifies a session token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-session-secret", 3600, 30)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let signer = signer();
        let token = signer.issue("admin").unwrap();
        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = signer().issue("admin").unwrap();
        let other = TokenSigner::new("different-secret", 3600, 30);
        assert!(matches!(other.verify(&token), Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(matches!(
            signer().verify("not.a.token"),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Issue with negative lifetime and no leeway.
        let signer = TokenSigner::new("test-session-secret", -120, 0);
        let token = signer.issue("admin").unwrap();
        assert!(matches!(signer.verify(&token), Err(TokenError::TokenExpired)));
    }

    #[test]
    fn test_jti_is_unique_per_token() {
        let signer = signer();
        let a = signer.verify(&signer.issue("admin").unwrap()).unwrap();
        let b = signer.verify(&signer.issue("admin").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }
}
