use std::sync::Arc;

use auth::AuthSettings;
use auth::Authenticator;
use auth::HashingSettings;
use auth::TokenSettings;
use blog_service::domain::article::service::ArticleService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::repositories::InMemoryRepository;
use serde_json::json;
use serde_json::Value;

pub const API_PREFIX: &str = "/api/v1";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap hashing costs keep the suite fast
        let authenticator = Arc::new(
            Authenticator::new(&AuthSettings {
                jwt: TokenSettings {
                    secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
                    algorithm: "HS256".to_string(),
                    access_token_expire_minutes: 60,
                },
                password: HashingSettings {
                    memory_kib: 8,
                    iterations: 1,
                    parallelism: 1,
                },
            })
            .expect("Failed to build authenticator"),
        );

        let repository = Arc::new(InMemoryRepository::new());
        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));
        let article_service = Arc::new(ArticleService::new(repository));

        let router = create_router(
            user_service,
            article_service,
            Arc::clone(&authenticator),
            API_PREFIX,
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            authenticator,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.address, API_PREFIX, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register a user and return the created payload
    pub async fn signup(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/users/signup")
            .json(&json!({
                "name": "Test",
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in with form credentials and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/users/login")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register, log in and return (user id, access token)
    pub async fn signup_and_login(&self, email: &str, password: &str) -> (i64, String) {
        let user = self.signup(email, password).await;
        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        let token = body["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string();

        (user["id"].as_i64().expect("Missing user id"), token)
    }

    /// Publish an article and return its id
    pub async fn create_article(&self, token: &str, title: &str) -> i64 {
        let response = self
            .post_authenticated("/articles", token)
            .json(&json!({
                "title": title,
                "description": "A short description",
                "url_source": "https://example.com/article"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing article id")
    }
}
