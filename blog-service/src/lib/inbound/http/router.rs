use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_article::create_article;
use super::handlers::delete_article::delete_article;
use super::handlers::delete_user::delete_user;
use super::handlers::get_article::get_article;
use super::handlers::get_logged_user::get_logged_user;
use super::handlers::get_user::get_user;
use super::handlers::list_articles::list_articles;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::signup::signup;
use super::handlers::update_article::update_article;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub article_service: Arc<dyn ArticleServicePort>,
    pub authenticator: Arc<Authenticator>,
}

/// Build the HTTP router with every route mounted under `api_prefix`.
///
/// An empty prefix or `/` mounts the routes at the root.
pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    article_service: Arc<dyn ArticleServicePort>,
    authenticator: Arc<Authenticator>,
    api_prefix: &str,
) -> Router {
    let state = AppState {
        user_service,
        article_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/users/login", post(login))
        .route("/users/signup", post(signup))
        .route("/users", get(list_users))
        .route("/users/:user_id", get(get_user))
        .route("/articles", get(list_articles))
        .route("/articles/:article_id", get(get_article));

    let protected_routes = Router::new()
        .route("/users/logged", get(get_logged_user))
        .route("/users/:user_id", put(update_user).delete(delete_user))
        .route("/articles", post(create_article))
        .route(
            "/articles/:article_id",
            put(update_article).delete(delete_article),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new().merge(public_routes).merge(protected_routes);

    let prefix = api_prefix.trim_end_matches('/');
    let routes = if prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(prefix, api_routes)
    };

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    routes
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
