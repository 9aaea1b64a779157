use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Named token kinds the issuer knows how to sign.
///
/// Serialized into the `type` claim; a token whose `type` is not listed here
/// fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    AccessToken,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::AccessToken => "access_token",
        }
    }
}

/// Signed token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Token kind
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Subject (stringified identity)
    pub sub: String,

    /// Issued at (Unix timestamp, UTC)
    pub iat: i64,

    /// Expiration time (Unix timestamp, UTC)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `subject` valid from `issued_at` for `lifetime`.
    ///
    /// Returns `None` when the expiration falls outside the representable range.
    pub fn new(
        token_type: TokenType,
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Option<Self> {
        let expiration = issued_at.checked_add_signed(lifetime)?;

        Some(Self {
            token_type,
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Check if token is expired. A token is no longer valid at its `exp` second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
