use auth::AccessToken;
use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Exchange an email and password for a bearer token.
///
/// Unknown email and wrong password produce the same response.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AccessToken>, ApiError> {
    let user = state
        .user_service
        .authenticate(&form.username, &form.password)
        .await?
        .ok_or_else(|| {
            tracing::info!("Login rejected");
            ApiError::invalid_credentials()
        })?;

    let token = state
        .authenticator
        .issue_access_token(&user.id.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "Token issuance failed");
            ApiError::InternalServerError("Internal server error".to_string())
        })?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(token))
}

/// Form-encoded credentials. `username` carries the email address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}
