use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::non_empty;
use super::ApiError;
use super::ApiSuccess;
use super::ArticleData;
use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleDescription;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::ArticleTitle;
use crate::domain::article::models::SourceUrl;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for editing an article. Empty or missing fields keep
/// their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url_source: Option<String>,
}

impl UpdateArticleRequest {
    fn try_into_command(self) -> Result<UpdateArticleCommand, ArticleError> {
        Ok(UpdateArticleCommand {
            title: non_empty(self.title).map(ArticleTitle::new).transpose()?,
            description: non_empty(self.description)
                .map(ArticleDescription::new)
                .transpose()?,
            url_source: non_empty(self.url_source).map(SourceUrl::new).transpose()?,
        })
    }
}

pub async fn update_article(
    State(state): State<AppState>,
    Extension(acting): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateArticleRequest>,
) -> Result<ApiSuccess<ArticleData>, ApiError> {
    let article_id = ArticleId::from_string(&id).map_err(ArticleError::from)?;
    let command = req.try_into_command()?;

    state
        .article_service
        .update_article(&article_id, command, &acting.id())
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::ACCEPTED, article.into()))
}
