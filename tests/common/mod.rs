//! Shared helpers for integration tests.
//!
//! Every test drives the full Axum router in-process over the in-memory
//! store backend, so no external services are required.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use notehub_api::app::{build_app, build_state};
use notehub_auth::password::PasswordHasher;
use notehub_core::config::{AppConfig, DatabaseConfig, ServerConfig};
use notehub_core::config::auth::AuthConfig;
use notehub_core::config::logging::LoggingConfig;
use notehub_database::Stores;
use notehub_database::memory::{MemoryNoteStore, MemoryUserStore};
use notehub_entity::user::{User, UserRole, UserStatus};

/// A fully wired application over in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserStore>,
}

/// Builds the application exactly as the server binary does, except the
/// stores are in-memory.
pub fn test_app() -> TestApp {
    let config = AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            backend: "memory".to_string(),
            ..DatabaseConfig::default()
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..AuthConfig::default()
        },
        logging: LoggingConfig::default(),
    };

    let users = Arc::new(MemoryUserStore::new());
    let stores = Stores {
        users: users.clone(),
        notes: Arc::new(MemoryNoteStore::new()),
    };

    TestApp {
        router: build_app(build_state(config, stores)),
        users,
    }
}

impl TestApp {
    /// Sends a request through the router and returns status + JSON body.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Registers an account through the API and returns the response data
    /// (token, refresh_token, user, ...).
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "name": name,
                    "email": email,
                    "password": password,
                    "confirm_password": password,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
        body["data"].clone()
    }

    /// Logs in through the API and returns the response data.
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"].clone()
    }

    /// Seeds an account directly into the store with the given role,
    /// bypassing registration (which always assigns Editor).
    pub async fn seed_user(&self, email: &str, password: &str, role: UserRole) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: email.split('@').next().unwrap_or("user").to_string(),
            password_hash: PasswordHasher::new().hash_password(password).unwrap(),
            role,
            status: UserStatus::Active,
            failed_login_attempts: 0,
            blocked_at: None,
            last_login_at: None,
            refresh_token: None,
            refresh_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.clone()).await;
        user
    }
}

/// Extracts `data.token` from a session response.
pub fn token(session: &Value) -> &str {
    session["token"].as_str().expect("session token missing")
}
