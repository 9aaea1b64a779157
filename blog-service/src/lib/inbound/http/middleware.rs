use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Extension type carrying the acting user into protected handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn id(&self) -> UserId {
        self.user.id
    }
}

/// Middleware that resolves the bearer token to a stored user and adds it to
/// request extensions.
///
/// Every failure answers with the same 401; the reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let subject = state.authenticator.resolve_subject(token).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        ApiError::invalid_token()
    })?;

    let user_id = UserId::from_string(&subject).map_err(|e| {
        tracing::warn!("Failed to parse user ID from token: {}", e);
        ApiError::invalid_token()
    })?;

    let user = state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => {
                tracing::warn!(user_id = %user_id, "Token subject no longer exists");
                ApiError::invalid_token()
            }
            other => ApiError::from(other),
        })?;

    req.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::invalid_token()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid ASCII");
        ApiError::invalid_token()
    })?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token),
        _ => {
            tracing::warn!("Authorization header is not a bearer token");
            Err(ApiError::invalid_token())
        }
    }
}
