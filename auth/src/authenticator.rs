use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::settings::AuthSettings;

const DUMMY_SECRET: &str = "dummy-secret-for-unknown-accounts";

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds no per-request state; share one instance behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    dummy_hash: String,
}

/// Token response returned to a client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Authenticator construction errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing parameters are invalid
    /// * `JwtError` - Signing secret, algorithm or lifetime is invalid
    pub fn new(settings: &AuthSettings) -> Result<Self, AuthenticationError> {
        let password_hasher = PasswordHasher::with_settings(&settings.password)?;
        let token_issuer = TokenIssuer::new(&settings.jwt)?;
        let dummy_hash = password_hasher.hash(DUMMY_SECRET)?;

        Ok(Self {
            password_hasher,
            token_issuer,
            dummy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a supplied password against the stored digest of the looked-up account.
    ///
    /// `stored_hash` is `None` when no account matched. That case still pays for
    /// one hash verification and always answers `false`, so an unknown account
    /// and a wrong password look the same to the caller.
    pub fn verify_credentials(&self, password: &str, stored_hash: Option<&str>) -> bool {
        match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash),
            None => {
                let _ = self.password_hasher.verify(password, &self.dummy_hash);
                false
            }
        }
    }

    /// Issue a bearer access token for an already verified subject.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_access_token(&self, subject: impl ToString) -> Result<AccessToken, JwtError> {
        self.token_issuer
            .issue_access_token(subject)
            .map(AccessToken::bearer)
    }

    /// Validate a bearer token and return the subject it was issued for.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, badly signed or expired
    pub fn resolve_subject(&self, token: &str) -> Result<String, JwtError> {
        self.token_issuer.verify_access_token(token)
    }

    pub fn token_issuer(&self) -> &TokenIssuer {
        &self.token_issuer
    }
}
