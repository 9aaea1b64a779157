use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::non_empty;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserWithArticlesData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let name = non_empty(self.name).map(PersonName::new).transpose()?;
        let surname = non_empty(self.surname).map(PersonName::new).transpose()?;
        let email = non_empty(self.email).map(EmailAddress::new).transpose()?;

        Ok(UpdateUserCommand {
            name,
            surname,
            email,
            password: non_empty(self.password),
            is_admin: self.is_admin,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(acting): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserWithArticlesData>, ApiError> {
    // Parse user ID and request at HTTP boundary
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = req.try_into_command()?;

    let user = state
        .user_service
        .update_user(&user_id, command, &acting.id())
        .await?;
    let articles = state.article_service.list_articles_by_owner(&user.id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UserWithArticlesData::new(&user, &articles),
    ))
}
