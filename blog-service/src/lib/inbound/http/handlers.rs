use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod create_article;
pub mod delete_article;
pub mod delete_user;
pub mod get_article;
pub mod get_logged_user;
pub mod get_user;
pub mod list_articles;
pub mod list_users;
pub mod login;
pub mod signup;
pub mod update_article;
pub mod update_user;

/// Message returned for every rejected bearer token.
pub const INVALID_TOKEN_MESSAGE: &str = "Could not validate credentials";

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect access data";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    NotAcceptable(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    /// Rejection for a missing, malformed, expired or orphaned bearer token.
    pub fn invalid_token() -> Self {
        ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
    }

    /// Rejection for a failed login.
    pub fn invalid_credentials() -> Self {
        ApiError::BadRequest(INVALID_CREDENTIALS_MESSAGE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::NotAcceptable(msg) => (StatusCode::NOT_ACCEPTABLE, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        let mut response =
            (status, Json(ApiResponseBody::new_error(status, message))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::NotAcceptable(err.to_string()),
            UserError::NotOwner(_) => ApiError::Forbidden(err.to_string()),
            UserError::InvalidUserId(_) | UserError::InvalidName(_) | UserError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Password(_) | UserError::DatabaseError(_) | UserError::Unknown(_) => {
                tracing::error!(error = %err, "User operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ArticleError::NotOwner(_) => ApiError::Forbidden(err.to_string()),
            ArticleError::InvalidArticleId(_) | ArticleError::InvalidField(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            ArticleError::DatabaseError(_) => {
                tracing::error!(error = %err, "Article operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of a user. The password hash never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_ref().map(|n| n.as_str().to_string()),
            surname: user.surname.as_ref().map(|n| n.as_str().to_string()),
            email: user.email.as_str().to_string(),
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWithArticlesData {
    #[serde(flatten)]
    pub user: UserData,
    pub articles: Vec<ArticleData>,
}

impl UserWithArticlesData {
    pub fn new(user: &User, articles: &[Article]) -> Self {
        Self {
            user: user.into(),
            articles: articles.iter().map(ArticleData::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleData {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub url_source: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Article> for ArticleData {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.0,
            title: article.title.as_str().to_string(),
            description: article.description.as_str().to_string(),
            url_source: article.url_source.as_str().to_string(),
            user_id: article.owner_id.0,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// Treat an empty form value the same as an absent one.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use auth::Mutation;

    use super::*;
    use crate::domain::article::models::ArticleId;
    use crate::domain::user::models::UserId;

    #[test]
    fn test_user_error_status_mapping() {
        assert!(matches!(
            ApiError::from(UserError::NotFound(UserId(1))),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::EmailAlreadyExists("a@x.com".to_string())),
            ApiError::NotAcceptable(_)
        ));
        assert_eq!(
            ApiError::from(UserError::NotOwner(Mutation::Delete)),
            ApiError::Forbidden("Users cannot delete profiles they do not own.".to_string())
        );
    }

    #[test]
    fn test_article_error_status_mapping() {
        assert_eq!(
            ApiError::from(ArticleError::NotFound(ArticleId(9999))),
            ApiError::NotFound("Article not found with id: 9999".to_string())
        );
        assert_eq!(
            ApiError::from(ArticleError::NotOwner(Mutation::Update)),
            ApiError::Forbidden("Users cannot modify articles they do not own.".to_string())
        );
    }

    #[test]
    fn test_storage_failure_hides_details() {
        assert_eq!(
            ApiError::from(ArticleError::DatabaseError("connection refused".to_string())),
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_unauthorized_carries_challenge_header() {
        let response = ApiError::invalid_token().into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
