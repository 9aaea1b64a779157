use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_article(
    State(state): State<AppState>,
    Extension(acting): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let article_id = ArticleId::from_string(&id).map_err(ArticleError::from)?;

    state
        .article_service
        .delete_article(&article_id, &acting.id())
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
