//! In-memory storage for users and articles, used by the HTTP test suite so it
//! runs without a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::NewArticle;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
struct InnerState {
    users: BTreeMap<i64, User>,
    articles: BTreeMap<i64, Article>,
    last_user_id: i64,
    last_article_id: i64,
}

impl InnerState {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.email.as_str() == email && Some(u.id) != except)
    }
}

/// Both repository ports over one shared map, so that deleting a user
/// removes the articles they own.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InnerState>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.state.lock().await;

        if state.email_taken(user.email.as_str(), None) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        state.last_user_id += 1;
        let now = Utc::now();
        let created = User {
            id: UserId(state.last_user_id),
            name: user.name,
            surname: user.surname,
            email: user.email,
            password_hash: user.password_hash,
            is_admin: user.is_admin,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(created.id.0, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let state = self.state.lock().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut state = self.state.lock().await;

        if !state.users.contains_key(&user.id.0) {
            return Err(UserError::NotFound(user.id));
        }

        if state.email_taken(user.email.as_str(), Some(user.id)) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        state.users.insert(user.id.0, user.clone());

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut state = self.state.lock().await;

        if state.users.remove(&id.0).is_none() {
            return Err(UserError::NotFound(*id));
        }

        state.articles.retain(|_, article| article.owner_id != *id);

        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for InMemoryRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let mut state = self.state.lock().await;

        if !state.users.contains_key(&article.owner_id.0) {
            return Err(ArticleError::DatabaseError(format!(
                "owner {} does not exist",
                article.owner_id
            )));
        }

        state.last_article_id += 1;
        let now = Utc::now();
        let created = Article {
            id: ArticleId(state.last_article_id),
            title: article.title,
            description: article.description,
            url_source: article.url_source,
            owner_id: article.owner_id,
            created_at: now,
            updated_at: now,
        };
        state.articles.insert(created.id.0, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError> {
        let state = self.state.lock().await;
        Ok(state.articles.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError> {
        let state = self.state.lock().await;
        Ok(state.articles.values().cloned().collect())
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Article>, ArticleError> {
        let state = self.state.lock().await;
        Ok(state
            .articles
            .values()
            .filter(|a| a.owner_id == *owner)
            .cloned()
            .collect())
    }

    async fn update(&self, article: Article) -> Result<Article, ArticleError> {
        let mut state = self.state.lock().await;

        match state.articles.get_mut(&article.id.0) {
            Some(stored) => {
                *stored = article.clone();
                Ok(article)
            }
            None => Err(ArticleError::NotFound(article.id)),
        }
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError> {
        let mut state = self.state.lock().await;

        match state.articles.remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(ArticleError::NotFound(*id)),
        }
    }
}
