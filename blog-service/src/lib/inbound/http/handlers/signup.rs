use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::non_empty;
use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PersonNameError;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    surname: Option<String>,
    email: String,
    password: String,
    #[serde(default)]
    is_admin: bool,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid name: {0}")]
    Name(#[from] PersonNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Password must not be empty")]
    EmptyPassword,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseSignupRequestError> {
        if self.password.is_empty() {
            return Err(ParseSignupRequestError::EmptyPassword);
        }

        Ok(CreateUserCommand {
            name: non_empty(self.name).map(PersonName::new).transpose()?,
            surname: non_empty(self.surname).map(PersonName::new).transpose()?,
            email: EmailAddress::new(self.email)?,
            password: self.password,
            is_admin: self.is_admin,
        })
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
