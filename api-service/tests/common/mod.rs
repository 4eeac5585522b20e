#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use api_service::domain::gw2::service::Gw2Service;
use api_service::domain::session::service::SessionService;
use api_service::domain::user::models::EmailAddress;
use api_service::domain::user::models::Page;
use api_service::domain::user::models::User;
use api_service::domain::user::models::UserId;
use api_service::domain::user::models::Username;
use api_service::domain::user::ports::UserRepository;
use api_service::domain::user::service::UserService;
use api_service::inbound::http::router::create_router;
use api_service::inbound::http::router::AppState;
use api_service::outbound::gw2::ReqwestGw2Client;
use api_service::user::errors::UserError;
use async_trait::async_trait;
use auth::Algorithm;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenService;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub upstream_address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub authenticator: Arc<Authenticator>,
    pub token_service: TokenService,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application and a stub upstream in background tasks
    pub async fn spawn() -> Self {
        let upstream_address = spawn_upstream().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::default());
        let authenticator = Arc::new(Authenticator::new(
            PasswordHasher::new().with_bcrypt_cost(4).unwrap(),
            token_service(),
        ));
        let gw2_client = Arc::new(
            ReqwestGw2Client::new(&format!("{upstream_address}/v2"), Duration::from_secs(5))
                .expect("Failed to create upstream client"),
        );

        let state = AppState {
            user_service: Arc::new(UserService::new(
                Arc::clone(&repository),
                Arc::clone(&authenticator),
            )),
            session_service: Arc::new(SessionService::new(
                Arc::clone(&repository),
                Arc::clone(&authenticator),
            )),
            gw2_service: Arc::new(Gw2Service::new(gw2_client)),
        };
        let router = create_router(state, &[ALLOWED_ORIGIN.to_string()]);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            upstream_address,
            repository,
            authenticator,
            token_service: token_service(),
            api_client: reqwest::Client::new(),
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

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user through the public endpoint
    pub async fn create_user(&self, email: &str, username: &str, password: &str) -> Value {
        let response = self
            .post("/users")
            .json(&json!({
                "email": email,
                "username": username,
                "full_name": "Test User",
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str, remember_me: bool) -> reqwest::Response {
        self.post("/auth/login")
            .json(&json!({
                "email": email,
                "password": password,
                "remember_me": remember_me,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        let response = self.login(email, password, false).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Create the standard demo account and return its token
    pub async fn demo_token(&self) -> String {
        self.create_user("demo@site.test", "demo", "Secret123").await;
        self.token_for("demo@site.test", "Secret123").await
    }
}

fn token_service() -> TokenService {
    TokenService::new(JWT_SECRET, Algorithm::HS256).expect("Failed to create token service")
}

/// Thread-safe in-memory user store with the same uniqueness rules as the
/// PostgreSQL schema
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn find(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned()
    }

    pub fn set_active(&self, email: &str, is_active: bool) {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.email.as_str() == email)
            .expect("User not found");
        user.is_active = is_active;
    }
}

fn check_unique(users: &[User], candidate: &User) -> Result<(), UserError> {
    for existing in users.iter().filter(|u| u.id != candidate.id) {
        if existing.email == candidate.email {
            return Err(UserError::EmailAlreadyExists(
                candidate.email.as_str().to_string(),
            ));
        }
        if existing.username == candidate.username {
            return Err(UserError::UsernameAlreadyExists(
                candidate.username.as_str().to_string(),
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        check_unique(&users, &user)?;
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self.find(email))
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, UserError> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by_key(|u| u.created_at);
        Ok(users
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        check_unique(&users, &user)?;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;
        *slot = user.clone();
        Ok(user)
    }

    async fn record_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.last_login = Some(at);
        Ok(())
    }
}

/// Build a user record directly, bypassing the service
pub fn user_record(email: &str, username: &str, password_hash: String) -> User {
    User {
        id: UserId::new(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        username: Username::new(username.to_string()).unwrap(),
        full_name: None,
        password_hash,
        is_active: true,
        created_at: Utc::now(),
        updated_at: None,
        last_login: None,
    }
}

/// Stub of the game-data API.
///
/// Echoes the request path and query. `access_token=invalid` yields 401 and
/// ids `404` yields 404; `/v2/legends` answers with a non-JSON body.
async fn spawn_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    let router = axum::Router::new().fallback(|request: Request| async move {
        let path = request.uri().path().to_string();
        let query = request.uri().query().unwrap_or_default().to_string();
        upstream_response(path, query)
    });

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Upstream error");
    });

    address
}

fn upstream_response(path: String, query: String) -> Response {
    if query.contains("access_token=invalid") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "text": "Invalid access token" })),
        )
            .into_response();
    }
    if path.ends_with("/404") {
        return (StatusCode::NOT_FOUND, Json(json!({ "text": "no such id" }))).into_response();
    }
    if path == "/v2/legends" {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }

    Json(json!({ "path": path, "query": query })).into_response()
}
