use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Unsupported signature algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Token lifetime must be positive and representable, got {0} minutes")]
    InvalidLifetime(i64),
}
