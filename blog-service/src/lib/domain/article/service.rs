use std::sync::Arc;

use async_trait::async_trait;
use auth::ensure_owner;
use auth::Mutation;
use chrono::Utc;

use super::errors::ArticleError;
use super::models::Article;
use super::models::ArticleId;
use super::models::CreateArticleCommand;
use super::models::NewArticle;
use super::models::UpdateArticleCommand;
use super::ports::ArticleRepository;
use super::ports::ArticleServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of ArticleServicePort.
///
/// Every mutation resolves the article first, then checks ownership, then writes.
pub struct ArticleService<AR>
where
    AR: ArticleRepository,
{
    repository: Arc<AR>,
}

impl<AR> ArticleService<AR>
where
    AR: ArticleRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }

    async fn find_existing(&self, id: &ArticleId) -> Result<Article, ArticleError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound(*id))
    }
}

#[async_trait]
impl<AR> ArticleServicePort for ArticleService<AR>
where
    AR: ArticleRepository,
{
    async fn create_article(
        &self,
        command: CreateArticleCommand,
        owner: &UserId,
    ) -> Result<Article, ArticleError> {
        let article = self
            .repository
            .create(NewArticle {
                title: command.title,
                description: command.description,
                url_source: command.url_source,
                owner_id: *owner,
            })
            .await?;

        tracing::info!(article_id = %article.id, owner_id = %owner, "Article created");

        Ok(article)
    }

    async fn list_articles(&self) -> Result<Vec<Article>, ArticleError> {
        self.repository.list_all().await
    }

    async fn list_articles_by_owner(&self, owner: &UserId) -> Result<Vec<Article>, ArticleError> {
        self.repository.find_by_owner(owner).await
    }

    async fn get_article(&self, id: &ArticleId) -> Result<Article, ArticleError> {
        self.find_existing(id).await
    }

    async fn update_article(
        &self,
        id: &ArticleId,
        command: UpdateArticleCommand,
        acting: &UserId,
    ) -> Result<Article, ArticleError> {
        let mut article = self.find_existing(id).await?;
        ensure_owner(&article, acting, Mutation::Update)?;

        if let Some(title) = command.title {
            article.title = title;
        }

        if let Some(description) = command.description {
            article.description = description;
        }

        if let Some(url_source) = command.url_source {
            article.url_source = url_source;
        }

        article.updated_at = Utc::now();

        self.repository.update(article).await
    }

    async fn delete_article(&self, id: &ArticleId, acting: &UserId) -> Result<(), ArticleError> {
        let article = self.find_existing(id).await?;
        ensure_owner(&article, acting, Mutation::Delete)?;

        self.repository.delete(&article.id).await?;

        tracing::info!(article_id = %article.id, "Article deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::domain::article::models::ArticleDescription;
    use crate::domain::article::models::ArticleTitle;
    use crate::domain::article::models::SourceUrl;

    mock! {
        pub TestArticleRepository {}

        #[async_trait]
        impl ArticleRepository for TestArticleRepository {
            async fn create(&self, article: NewArticle) -> Result<Article, ArticleError>;
            async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError>;
            async fn list_all(&self) -> Result<Vec<Article>, ArticleError>;
            async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Article>, ArticleError>;
            async fn update(&self, article: Article) -> Result<Article, ArticleError>;
            async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError>;
        }
    }

    fn stored_article(id: i64, owner: i64) -> Article {
        Article {
            id: ArticleId(id),
            title: ArticleTitle::new("Ownership in Rust".to_string()).unwrap(),
            description: ArticleDescription::new("Borrowing explained".to_string()).unwrap(),
            url_source: SourceUrl::new("https://example.com/ownership".to_string()).unwrap(),
            owner_id: UserId(owner),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_article_owned_by_acting_user() {
        let mut repository = MockTestArticleRepository::new();

        repository
            .expect_create()
            .withf(|article| article.owner_id == UserId(3))
            .times(1)
            .returning(|article| {
                Ok(Article {
                    id: ArticleId(1),
                    title: article.title,
                    description: article.description,
                    url_source: article.url_source,
                    owner_id: article.owner_id,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = ArticleService::new(Arc::new(repository));

        let command = CreateArticleCommand {
            title: ArticleTitle::new("Title".to_string()).unwrap(),
            description: ArticleDescription::new("Description".to_string()).unwrap(),
            url_source: SourceUrl::new("https://example.com".to_string()).unwrap(),
        };

        let article = service.create_article(command, &UserId(3)).await.unwrap();
        assert_eq!(article.owner_id, UserId(3));
        assert_eq!(article.id, ArticleId(1));
    }

    #[tokio::test]
    async fn test_get_article_not_found() {
        let mut repository = MockTestArticleRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ArticleService::new(Arc::new(repository));

        let result = service.get_article(&ArticleId(9999)).await;
        assert!(matches!(result, Err(ArticleError::NotFound(ArticleId(9999)))));
    }

    #[tokio::test]
    async fn test_update_article_by_owner_keeps_missing_fields() {
        let mut repository = MockTestArticleRepository::new();

        let existing = stored_article(1, 3);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(|article| {
                article.title.as_str() == "New title"
                    && article.description.as_str() == "Borrowing explained"
                    && article.url_source.as_str() == "https://example.com/ownership"
            })
            .times(1)
            .returning(|article| Ok(article));

        let service = ArticleService::new(Arc::new(repository));

        let command = UpdateArticleCommand {
            title: Some(ArticleTitle::new("New title".to_string()).unwrap()),
            ..Default::default()
        };

        let updated = service
            .update_article(&ArticleId(1), command, &UserId(3))
            .await
            .unwrap();
        assert_eq!(updated.title.as_str(), "New title");
        assert_eq!(updated.owner_id, UserId(3));
    }

    #[tokio::test]
    async fn test_update_article_by_other_user_rejected() {
        let mut repository = MockTestArticleRepository::new();

        let existing = stored_article(1, 3);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_update().times(0);

        let service = ArticleService::new(Arc::new(repository));

        let result = service
            .update_article(&ArticleId(1), UpdateArticleCommand::default(), &UserId(4))
            .await;
        assert!(matches!(
            result,
            Err(ArticleError::NotOwner(Mutation::Update))
        ));
    }

    #[tokio::test]
    async fn test_delete_article_by_owner() {
        let mut repository = MockTestArticleRepository::new();

        let existing = stored_article(1, 3);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_delete()
            .withf(|id| *id == ArticleId(1))
            .times(1)
            .returning(|_| Ok(()));

        let service = ArticleService::new(Arc::new(repository));

        assert!(service
            .delete_article(&ArticleId(1), &UserId(3))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_article_by_other_user_rejected() {
        let mut repository = MockTestArticleRepository::new();

        let existing = stored_article(1, 3);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_delete().times(0);

        let service = ArticleService::new(Arc::new(repository));

        let result = service.delete_article(&ArticleId(1), &UserId(4)).await;
        assert!(matches!(
            result,
            Err(ArticleError::NotOwner(Mutation::Delete))
        ));
    }

    #[tokio::test]
    async fn test_missing_article_is_not_found_for_any_user() {
        let mut repository = MockTestArticleRepository::new();

        repository
            .expect_find_by_id()
            .times(2)
            .returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = ArticleService::new(Arc::new(repository));

        for acting in [UserId(3), UserId(4)] {
            let result = service.delete_article(&ArticleId(9999), &acting).await;
            assert!(matches!(result, Err(ArticleError::NotFound(_))));
        }
    }
}
