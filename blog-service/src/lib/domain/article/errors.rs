use auth::Mutation;
use auth::OwnershipError;
use thiserror::Error;

use crate::domain::article::models::ArticleId;

/// Error for ArticleId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleIdError {
    #[error("Invalid article id: {0}")]
    InvalidFormat(String),
}

/// Error for article text field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleFieldError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Top-level error for all article-related operations
#[derive(Debug, Clone, Error)]
pub enum ArticleError {
    #[error("Invalid article ID: {0}")]
    InvalidArticleId(#[from] ArticleIdError),

    #[error("Invalid article: {0}")]
    InvalidField(#[from] ArticleFieldError),

    #[error("Article not found with id: {0}")]
    NotFound(ArticleId),

    #[error("Users cannot {0} articles they do not own.")]
    NotOwner(Mutation),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<OwnershipError> for ArticleError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NotOwner(mutation) => ArticleError::NotOwner(mutation),
        }
    }
}
