use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use notice_service::config::Environment;
use notice_service::domain::notice::service::NoticeService;
use notice_service::domain::user::service::UserService;
use notice_service::inbound::http::router::create_router;
use notice_service::notice::ports::NoticeServicePort;
use notice_service::outbound::repositories::InMemoryNoticeRepository;
use notice_service::outbound::repositories::InMemoryUserRepository;
use notice_service::user::ports::UserServicePort;
use serde_json::json;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server on a random port, backed by
/// the in-memory repositories.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_in(Environment::Development).await
    }

    /// Spawn with an explicit environment (production disables seed-admin)
    pub async fn spawn_in(environment: Environment) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let notice_repository = Arc::new(InMemoryNoticeRepository::new());
        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET));

        let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        ));
        let notice_service: Arc<dyn NoticeServicePort> =
            Arc::new(NoticeService::new(notice_repository, user_repository));

        let router = create_router(user_service, notice_service, authenticator, 24, environment);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return its bearer token.
    pub async fn register_for_token(&self, name: &str, email: &str, password: &str, role: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
                "role": role
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "registration should succeed"
        );

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Seed the bootstrap admin and return its bearer token.
    pub async fn admin_token(&self) -> String {
        let response = self
            .post("/api/users/seed-admin")
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "seeding should succeed"
        );

        let response = self
            .post("/api/auth/login")
            .json(&json!({
                "email": "admin@school.edu",
                "password": "hiss"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"].as_str().unwrap().to_string()
    }
}
