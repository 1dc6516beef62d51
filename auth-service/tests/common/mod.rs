use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth_service::domain::user::errors::AuthError;
use auth_service::domain::user::models::User;
use auth_service::domain::user::ports::UserStore;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use chrono::Duration;
use jsonwebtoken::Algorithm;

pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server on a random port.
///
/// Backed by an in-memory store so the suite runs without Postgres.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub store: Arc<InMemoryUserStore>,
}

impl TestApp {
    /// Spawn the application with the default 30 minute token lifetime
    pub async fn spawn() -> Self {
        Self::spawn_with_token_lifetime(Duration::minutes(30)).await
    }

    /// Spawn the application with an explicit token lifetime.
    ///
    /// A negative lifetime issues tokens that are already expired, which is
    /// how the expiry path is exercised without clock mocking.
    pub async fn spawn_with_token_lifetime(lifetime: Duration) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryUserStore::new());
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&store),
            SECRET,
            Algorithm::HS256,
            lifetime,
        ));

        let router = create_router(auth_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            store,
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

    /// Register a user and return the response
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&serde_json::json!({
                "first_name": "A",
                "last_name": "B",
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in with the OAuth2 password form and return the response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and extract the access token, asserting success
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}

/// In-memory `UserStore` with the same atomicity contract as the Postgres
/// adapter: `create` is atomic with respect to email uniqueness.
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Drop a user, simulating deletion after token issuance
    pub fn remove(&self, email: &str) {
        self.users.lock().unwrap().remove(email);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        let email = user.email.as_str().to_string();
        if users.contains_key(&email) {
            return Err(AuthError::EmailAlreadyExists(email));
        }
        users.insert(email, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }
}
