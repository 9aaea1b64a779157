use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserWithArticlesData;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserWithArticlesData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    let user = state.user_service.get_user(&user_id).await?;
    let articles = state.article_service.list_articles_by_owner(&user.id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UserWithArticlesData::new(&user, &articles),
    ))
}
