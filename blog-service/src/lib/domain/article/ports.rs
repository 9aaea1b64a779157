use async_trait::async_trait;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::user::models::UserId;

/// Port for article domain service operations.
#[async_trait]
pub trait ArticleServicePort: Send + Sync + 'static {
    /// Publish an article owned by `owner`.
    async fn create_article(
        &self,
        command: CreateArticleCommand,
        owner: &UserId,
    ) -> Result<Article, ArticleError>;

    /// Retrieve all articles.
    async fn list_articles(&self) -> Result<Vec<Article>, ArticleError>;

    /// Retrieve articles owned by one user.
    async fn list_articles_by_owner(&self, owner: &UserId) -> Result<Vec<Article>, ArticleError>;

    /// Retrieve article by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    async fn get_article(&self, id: &ArticleId) -> Result<Article, ArticleError>;

    /// Apply a partial update on behalf of `acting`.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist (checked first)
    /// * `NotOwner` - `acting` does not own the article
    async fn update_article(
        &self,
        id: &ArticleId,
        command: UpdateArticleCommand,
        acting: &UserId,
    ) -> Result<Article, ArticleError>;

    /// Delete an article on behalf of `acting`.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist (checked first)
    /// * `NotOwner` - `acting` does not own the article
    async fn delete_article(&self, id: &ArticleId, acting: &UserId) -> Result<(), ArticleError>;
}

/// Persistence operations for articles.
#[async_trait]
pub trait ArticleRepository: Send + Sync + 'static {
    /// Persist a new article and return it with its assigned id.
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError>;

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError>;

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError>;

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Article>, ArticleError>;

    /// # Errors
    /// * `NotFound` - Article does not exist
    async fn update(&self, article: Article) -> Result<Article, ArticleError>;

    /// # Errors
    /// * `NotFound` - Article does not exist
    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError>;
}
