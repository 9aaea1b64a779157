use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleDescription;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::ArticleTitle;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::SourceUrl;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::user::models::UserId;

const ARTICLE_COLUMNS: &str = "id, title, description, url_source, user_id, created_at, updated_at";

pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    description: String,
    url_source: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = ArticleError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId(row.id),
            title: ArticleTitle::new(row.title)?,
            description: ArticleDescription::new(row.description)?,
            url_source: SourceUrl::new(row.url_source)?,
            owner_id: UserId(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ArticleError {
    ArticleError::DatabaseError(e.to_string())
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let query = format!(
            r#"
            INSERT INTO articles (title, description, url_source, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {ARTICLE_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(article.title.as_str())
            .bind(article.description.as_str())
            .bind(article.url_source.as_str())
            .bind(article.owner_id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError> {
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");

        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(Article::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError> {
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY id");

        let rows = sqlx::query_as::<_, ArticleRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Article>, ArticleError> {
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE user_id = $1 ORDER BY id");

        let rows = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(owner.0)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn update(&self, article: Article) -> Result<Article, ArticleError> {
        let query = format!(
            r#"
            UPDATE articles
            SET title = $2, description = $3, url_source = $4, updated_at = $5
            WHERE id = $1
            RETURNING {ARTICLE_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(article.id.0)
            .bind(article.title.as_str())
            .bind(article.description.as_str())
            .bind(article.url_source.as_str())
            .bind(article.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        match row {
            Some(row) => row.try_into(),
            None => Err(ArticleError::NotFound(article.id)),
        }
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ArticleError::NotFound(*id));
        }

        Ok(())
    }
}
