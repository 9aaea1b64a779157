use std::fmt;

use auth::Owned;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::article::errors::ArticleFieldError;
use crate::domain::article::errors::ArticleIdError;
use crate::domain::user::models::UserId;

const MAX_TEXT_LENGTH: usize = 256;

/// Article entity, owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub description: ArticleDescription,
    pub url_source: SourceUrl,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Article {
    type Owner = UserId;

    fn owner(&self) -> &UserId {
        &self.owner_id
    }
}

/// Article unique identifier type, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(pub i64);

impl ArticleId {
    /// Parse an article ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid integer
    pub fn from_string(s: &str) -> Result<Self, ArticleIdError> {
        s.parse::<i64>()
            .map(ArticleId)
            .map_err(|e| ArticleIdError::InvalidFormat(format!("{}: {}", s, e)))
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn bounded_text(field: &'static str, value: String) -> Result<String, ArticleFieldError> {
    if value.trim().is_empty() {
        return Err(ArticleFieldError::Blank { field });
    }

    let length = value.chars().count();
    if length > MAX_TEXT_LENGTH {
        return Err(ArticleFieldError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
            actual: length,
        });
    }

    Ok(value)
}

/// Article headline, non-blank and at most 256 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn new(title: String) -> Result<Self, ArticleFieldError> {
        bounded_text("title", title).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Article summary, non-blank and at most 256 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDescription(String);

impl ArticleDescription {
    pub fn new(description: String) -> Result<Self, ArticleFieldError> {
        bounded_text("description", description).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where the article was published. Stored as given, not resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl(String);

impl SourceUrl {
    pub fn new(url: String) -> Result<Self, ArticleFieldError> {
        bounded_text("url_source", url).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Article fields ready to be persisted; storage assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub description: ArticleDescription,
    pub url_source: SourceUrl,
    pub owner_id: UserId,
}

/// Command to publish an article. The owner is the acting user, never the payload.
#[derive(Debug)]
pub struct CreateArticleCommand {
    pub title: ArticleTitle,
    pub description: ArticleDescription,
    pub url_source: SourceUrl,
}

/// Partial article update; absent fields keep their stored value.
#[derive(Debug, Default)]
pub struct UpdateArticleCommand {
    pub title: Option<ArticleTitle>,
    pub description: Option<ArticleDescription>,
    pub url_source: Option<SourceUrl>,
}
