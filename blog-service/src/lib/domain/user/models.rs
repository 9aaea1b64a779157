use std::fmt;
use std::str::FromStr;

use auth::Owned;
use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::PersonNameError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered account. The password is only ever held as its digest.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Option<PersonName>,
    pub surname: Option<PersonName>,
    pub email: EmailAddress,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for User {
    type Owner = UserId;

    /// A profile is owned by the account itself.
    fn owner(&self) -> &UserId {
        &self.id
    }
}

/// User unique identifier type, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - Decimal integer string
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        s.parse::<i64>()
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(format!("{}: {}", s, e)))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First name or surname.
///
/// Non-blank and at most 256 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 256;

    pub fn new(name: String) -> Result<Self, PersonNameError> {
        if name.trim().is_empty() {
            return Err(PersonNameError::Blank);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored and compared
/// exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 256;

    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `TooLong` - Longer than 256 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User fields ready to be persisted; storage assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: Option<PersonName>,
    pub surname: Option<PersonName>,
    pub email: EmailAddress,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub name: Option<PersonName>,
    pub surname: Option<PersonName>,
    pub email: EmailAddress,
    pub password: String,
    pub is_admin: bool,
}

/// Command to update an existing user with optional validated fields.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub name: Option<PersonName>,
    pub surname: Option<PersonName>,
    pub email: Option<EmailAddress>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}
