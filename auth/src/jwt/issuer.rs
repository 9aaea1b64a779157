use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenType;
use super::errors::JwtError;
use crate::settings::TokenSettings;

/// Signs and verifies time-bounded bearer tokens.
///
/// The signature covers the whole payload, so changing the subject or either
/// timestamp invalidates the token. Only HMAC algorithms are accepted.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_token_lifetime: Duration,
}

impl TokenIssuer {
    /// Create a token issuer from signing settings.
    ///
    /// # Errors
    /// * `EmptySecret` - Secret is empty
    /// * `UnsupportedAlgorithm` - Algorithm is not an HMAC variant
    /// * `InvalidLifetime` - Access token lifetime is not positive, or too
    ///   large for an expiration timestamp to be computed
    pub fn new(settings: &TokenSettings) -> Result<Self, JwtError> {
        if settings.secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }

        let algorithm = parse_hmac_algorithm(&settings.algorithm)?;
        let access_token_lifetime = parse_lifetime(settings.access_token_expire_minutes)?;

        let secret = settings.secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            access_token_lifetime,
        })
    }

    /// Configured lifetime for a token type.
    pub fn lifetime(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::AccessToken => self.access_token_lifetime,
        }
    }

    /// Issue an access token for `subject`, valid from now.
    pub fn issue_access_token(&self, subject: impl ToString) -> Result<String, JwtError> {
        self.issue(TokenType::AccessToken, subject)
    }

    /// Issue a token of the given type, valid from now.
    pub fn issue(&self, token_type: TokenType, subject: impl ToString) -> Result<String, JwtError> {
        self.issue_at(token_type, subject, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_at(
        &self,
        token_type: TokenType,
        subject: impl ToString,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(token_type, subject, issued_at, self.lifetime(token_type))
            .ok_or_else(|| {
                JwtError::EncodingFailed("expiration out of range".to_string())
            })?;
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify an access token and return its subject.
    pub fn verify_access_token(&self, token: &str) -> Result<String, JwtError> {
        self.verify(token).map(|claims| claims.sub)
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature and payload, then check expiry against `now`.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch, wrong algorithm or unparsable payload
    /// * `TokenExpired` - `now` is at or past the `exp` claim
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        if token_data.claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

fn parse_hmac_algorithm(name: &str) -> Result<Algorithm, JwtError> {
    match Algorithm::from_str(name) {
        Ok(algorithm @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(algorithm),
        _ => Err(JwtError::UnsupportedAlgorithm(name.to_string())),
    }
}

/// Accept a lifetime only if tokens issued now can carry an expiration.
fn parse_lifetime(minutes: i64) -> Result<Duration, JwtError> {
    if minutes <= 0 {
        return Err(JwtError::InvalidLifetime(minutes));
    }

    Duration::try_minutes(minutes)
        .filter(|lifetime| Utc::now().checked_add_signed(*lifetime).is_some())
        .ok_or(JwtError::InvalidLifetime(minutes))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SECRET: &str = "my_secret_key_at_least_32_bytes_long!";

    fn settings(secret: &str, algorithm: &str, minutes: i64) -> TokenSettings {
        TokenSettings {
            secret: secret.to_string(),
            algorithm: algorithm.to_string(),
            access_token_expire_minutes: minutes,
        }
    }

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&settings(SECRET, "HS256", 60)).expect("Failed to build issuer")
    }

    fn splice(header_and_signature: &str, payload_from: &str) -> String {
        let original: Vec<&str> = header_and_signature.split('.').collect();
        let other: Vec<&str> = payload_from.split('.').collect();
        format!("{}.{}.{}", original[0], other[1], original[2])
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();

        let token = issuer.issue_access_token(42).expect("Failed to issue token");
        assert!(!token.is_empty());

        let subject = issuer
            .verify_access_token(&token)
            .expect("Failed to verify token");
        assert_eq!(subject, "42");
    }

    #[test]
    fn test_claims_carry_type_and_lifetime() {
        let issuer = issuer();
        let issued_at = Utc::now();

        let token = issuer
            .issue_at(TokenType::AccessToken, "7", issued_at)
            .expect("Failed to issue token");
        let claims = issuer.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.token_type, TokenType::AccessToken);
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_valid_until_expiry() {
        let issuer = issuer();
        let issued_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        let token = issuer
            .issue_at(TokenType::AccessToken, "1", issued_at)
            .expect("Failed to issue token");

        let just_before = issued_at + Duration::minutes(60) - Duration::seconds(1);
        assert_eq!(issuer.verify_at(&token, issued_at).unwrap().sub, "1");
        assert_eq!(issuer.verify_at(&token, just_before).unwrap().sub, "1");
    }

    #[test]
    fn test_expired_at_and_after_expiry() {
        let issuer = issuer();
        let issued_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

        let token = issuer
            .issue_at(TokenType::AccessToken, "1", issued_at)
            .expect("Failed to issue token");

        let at_expiry = issued_at + Duration::minutes(60);
        assert_eq!(
            issuer.verify_at(&token, at_expiry),
            Err(JwtError::TokenExpired)
        );
        assert_eq!(
            issuer.verify_at(&token, at_expiry + Duration::days(1)),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_token_issued_long_ago_is_expired_now() {
        let issuer = issuer();
        let issued_at = Utc::now() - Duration::minutes(61);

        let token = issuer
            .issue_at(TokenType::AccessToken, "1", issued_at)
            .expect("Failed to issue token");

        assert_eq!(issuer.verify(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_tampered_subject_rejected() {
        let issuer = issuer();
        let issued_at = Utc::now();

        let genuine = issuer
            .issue_at(TokenType::AccessToken, "1", issued_at)
            .expect("Failed to issue token");
        let other = issuer
            .issue_at(TokenType::AccessToken, "2", issued_at)
            .expect("Failed to issue token");

        let forged = splice(&genuine, &other);
        assert!(matches!(
            issuer.verify(&forged),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_tampered_timestamps_rejected() {
        let issuer = issuer();
        let issued_at = Utc::now();

        let genuine = issuer
            .issue_at(TokenType::AccessToken, "1", issued_at)
            .expect("Failed to issue token");
        let extended = issuer
            .issue_at(TokenType::AccessToken, "1", issued_at + Duration::days(30))
            .expect("Failed to issue token");

        let forged = splice(&genuine, &extended);
        assert!(matches!(
            issuer.verify(&forged),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_decode_invalid_token() {
        let issuer = issuer();

        assert!(matches!(
            issuer.verify("invalid.token.here"),
            Err(JwtError::InvalidToken(_))
        ));
        assert!(matches!(issuer.verify(""), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let issuer1 = issuer();
        let issuer2 = TokenIssuer::new(&settings("secret2_at_least_32_bytes_long_key!", "HS256", 60))
            .expect("Failed to build issuer");

        let token = issuer1.issue_access_token("1").expect("Failed to issue token");

        assert!(matches!(
            issuer2.verify(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let hs256 = issuer();
        let hs512 = TokenIssuer::new(&settings(SECRET, "HS512", 60)).expect("Failed to build issuer");

        let token = hs256.issue_access_token("1").expect("Failed to issue token");
        assert!(matches!(
            hs512.verify(&token),
            Err(JwtError::InvalidToken(_))
        ));

        let token = hs512.issue_access_token("1").expect("Failed to issue token");
        assert_eq!(hs512.verify_access_token(&token).unwrap(), "1");
    }

    #[test]
    fn test_rejects_misconfiguration() {
        assert!(matches!(
            TokenIssuer::new(&settings(SECRET, "RS256", 60)),
            Err(JwtError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            TokenIssuer::new(&settings(SECRET, "none", 60)),
            Err(JwtError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            TokenIssuer::new(&settings("", "HS256", 60)),
            Err(JwtError::EmptySecret)
        ));
        assert!(matches!(
            TokenIssuer::new(&settings(SECRET, "HS256", 0)),
            Err(JwtError::InvalidLifetime(0))
        ));
    }

    #[test]
    fn test_rejects_lifetime_beyond_timestamp_range() {
        for minutes in [1_000_000_000_000, i64::MAX] {
            assert!(matches!(
                TokenIssuer::new(&settings(SECRET, "HS256", minutes)),
                Err(JwtError::InvalidLifetime(m)) if m == minutes
            ));
        }
    }

    #[test]
    fn test_issue_far_in_the_future_is_an_error() {
        let issuer = TokenIssuer::new(&settings(SECRET, "HS256", 60)).unwrap();

        let result = issuer.issue_at(TokenType::AccessToken, 1, DateTime::<Utc>::MAX_UTC);

        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));
    }
}
