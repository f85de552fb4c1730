//! Admin session service.
//!
//! Logins verify the configured admin credential (username + Argon2id hash)
//! and issue signed session tokens. The session object is explicit: every
//! admin route receives an `AdminSession` extension, there is no global
//! "is authenticated" flag and no credential lives in code.

use thiserror::Error;
use tracing::{info, warn};

use shared::password::verify_password;
use shared::token::{TokenError, TokenSigner};

use crate::config::SessionConfig;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session has expired")]
    SessionExpired,

    #[error("Invalid session token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_in: i64,
}

/// An authenticated admin, extracted from a verified session token.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub username: String,
    pub jti: String,
}

/// Issues and verifies admin sessions.
pub struct SessionService {
    username: String,
    password_hash: String,
    signer: TokenSigner,
}

impl SessionService {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            username: config.admin_username.clone(),
            password_hash: config.admin_password_hash.clone(),
            signer: TokenSigner::new(
                &config.secret,
                config.token_expiry_secs,
                config.leeway_secs,
            ),
        }
    }

    /// Verifies the credential pair and issues a session token.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedSession, SessionError> {
        if username != self.username {
            warn!(username, "Login rejected: unknown admin");
            return Err(SessionError::InvalidCredentials);
        }

        let verified = verify_password(password, &self.password_hash)
            .map_err(|e| SessionError::Internal(e.to_string()))?;
        if !verified {
            warn!(username, "Login rejected: wrong password");
            return Err(SessionError::InvalidCredentials);
        }

        let token = self
            .signer
            .issue(username)
            .map_err(|e| SessionError::Internal(e.to_string()))?;

        info!(username, "Admin session issued");
        Ok(IssuedSession {
            token,
            expires_in: self.signer.expiry_secs,
        })
    }

    /// Verifies a bearer token into an admin session.
    pub fn verify(&self, token: &str) -> Result<AdminSession, SessionError> {
        let claims = self.signer.verify(token).map_err(|e| match e {
            TokenError::TokenExpired => SessionError::SessionExpired,
            _ => SessionError::InvalidToken,
        })?;

        Ok(AdminSession {
            username: claims.sub,
            jti: claims.jti,
        })
    }
}
