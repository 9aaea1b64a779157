use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;

/// The user the bearer token resolved to.
pub async fn get_logged_user(
    Extension(acting): Extension<AuthenticatedUser>,
) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, (&acting.user).into())
}
