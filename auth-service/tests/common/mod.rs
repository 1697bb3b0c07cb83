use std::sync::Arc;

use auth::Authenticator;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserDirectory;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(authenticator()).await
    }

    /// Spawn the application around a custom authenticator
    pub async fn spawn_with(authenticator: Authenticator) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(authenticator);
        let user_directory = Arc::new(InMemoryUserDirectory::new());
        let auth_service = Arc::new(AuthService::new(
            user_directory,
            Arc::clone(&authenticator),
        ));

        let router = create_router(auth_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&json!({
                "first_name": "Nicola",
                "last_name": "Tesla",
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a user that is expected to succeed and return its token pair
    pub async fn register_ok(&self, email: &str, password: &str) -> (String, String) {
        let body: Value = self
            .register(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        token_pair(&body)
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn refresh(&self, access_token: &str, refresh_token: &str) -> reqwest::Response {
        self.post("/auth/refresh-token")
            .form(&[
                ("access_token", access_token),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn authenticator() -> Authenticator {
    Authenticator::new(JWT_SECRET).with_issuer_and_audience("auth-service", "integration-tests")
}

/// Pull `(access_token, refresh_token)` out of a success envelope
pub fn token_pair(body: &Value) -> (String, String) {
    (
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string(),
        body["data"]["refresh_token"]
            .as_str()
            .expect("Missing refresh token")
            .to_string(),
    )
}
