//! Authentication utilities library
//!
//! Provides the authentication core used by the blog service:
//! - Password hashing (Argon2id, self-describing PHC digests)
//! - Signed, time-bounded access tokens (HMAC JWT)
//! - Credential verification that does not reveal which factor failed
//! - Ownership checks for mutating owned resources
//!
//! Services own their lookups and persistence; this crate only sees digests,
//! subjects and owner identities.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{TokenIssuer, TokenSettings};
//!
//! let settings = TokenSettings {
//!     secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!     algorithm: "HS256".to_string(),
//!     access_token_expire_minutes: 60,
//! };
//! let issuer = TokenIssuer::new(&settings).unwrap();
//! let token = issuer.issue_access_token(42).unwrap();
//! assert_eq!(issuer.verify_access_token(&token).unwrap(), "42");
//! ```
//!
//! ## Ownership
//! ```
//! use auth::{authorize_mutation, Mutation};
//!
//! assert!(authorize_mutation(&1, &1, Mutation::Update).is_ok());
//! assert!(authorize_mutation(&2, &1, Mutation::Delete).is_err());
//! ```

pub mod authenticator;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod settings;

// Re-export commonly used items
pub use authenticator::AccessToken;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use guard::authorize_mutation;
pub use guard::ensure_owner;
pub use guard::Mutation;
pub use guard::Owned;
pub use guard::OwnershipError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use settings::AuthSettings;
pub use settings::HashingSettings;
pub use settings::TokenSettings;
