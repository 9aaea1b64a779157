use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ArticleData;
use crate::domain::article::errors::ArticleFieldError;
use crate::domain::article::models::ArticleDescription;
use crate::domain::article::models::ArticleTitle;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::SourceUrl;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Publish an article owned by the acting user.
pub async fn create_article(
    State(state): State<AppState>,
    Extension(acting): Extension<AuthenticatedUser>,
    Json(body): Json<CreateArticleRequest>,
) -> Result<ApiSuccess<ArticleData>, ApiError> {
    let command = body
        .try_into_command()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .article_service
        .create_article(command, &acting.id())
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::CREATED, article.into()))
}

/// HTTP request body for publishing an article. Any owner field is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateArticleRequest {
    title: String,
    description: String,
    url_source: String,
}

impl CreateArticleRequest {
    fn try_into_command(self) -> Result<CreateArticleCommand, ArticleFieldError> {
        Ok(CreateArticleCommand {
            title: ArticleTitle::new(self.title)?,
            description: ArticleDescription::new(self.description)?,
            url_source: SourceUrl::new(self.url_source)?,
        })
    }
}
