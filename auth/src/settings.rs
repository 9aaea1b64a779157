use std::fmt;

use argon2::Params;
use serde::Deserialize;

/// Immutable configuration for the authentication core.
///
/// Built once at process start and passed by reference to
/// [`crate::Authenticator::new`].
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt: TokenSettings,
    pub password: HashingSettings,
}

/// Token signing configuration.
#[derive(Clone, Deserialize)]
pub struct TokenSettings {
    /// Shared HMAC secret
    pub secret: String,

    /// Signature algorithm name (`HS256`, `HS384` or `HS512`)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .finish()
    }
}

/// Argon2id cost parameters used for newly created digests.
///
/// Existing digests carry their own parameters and verify regardless of
/// what is configured here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HashingSettings {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,

    #[serde(default = "default_iterations")]
    pub iterations: u32,

    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_expire_minutes() -> i64 {
    60 * 24 * 7
}

fn default_memory_kib() -> u32 {
    Params::DEFAULT_M_COST
}

fn default_iterations() -> u32 {
    Params::DEFAULT_T_COST
}

fn default_parallelism() -> u32 {
    Params::DEFAULT_P_COST
}
