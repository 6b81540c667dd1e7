use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use catalog_api::{config::AppConfig, create_app, db, AppState};

const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only_32chars";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Spins up the application against a fresh SQLite database in a temp
/// directory, with an admin account and a valid token ready to use.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub token: String,
    _dir: tempfile::TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db_path = dir.path().join("catalog_test.db");
        let upload_dir = dir.path().join("uploads");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            TEST_JWT_SECRET.to_string(),
            3600,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.upload_dir = upload_dir.display().to_string();
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);

        let admin = state
            .services
            .users
            .register(
                ADMIN_EMAIL.to_string(),
                ADMIN_PASSWORD.to_string(),
                "Admin".to_string(),
                true,
            )
            .await
            .expect("register admin");
        let token = state.auth.generate_token(&admin).expect("issue token");

        let router = create_app(state.clone());

        Self {
            router,
            state,
            token,
            _dir: dir,
        }
    }

    /// Sends a request and returns the status plus the decoded JSON body
    /// (Null for empty bodies).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        authed: bool,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if authed {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        self.raw(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, false).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), true).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body), true).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None, true).await
    }

    /// Sends a raw request, for multipart bodies and custom headers.
    pub async fn raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router handled request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

/// Creates a language the fixtures below can hang localizations off.
pub async fn seed_language(app: &TestApp, code: &str, name: &str) {
    let (status, _) = app
        .post(
            "/api/v1/languages",
            serde_json::json!({ "code": code, "name": name }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "seed language {}", code);
}

pub async fn seed_color(app: &TestApp, name: &str, hex: &str) -> String {
    let (status, body) = app
        .post(
            "/api/v1/colors",
            serde_json::json!({ "name": name, "hex": hex }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "seed color {}", name);
    body["id"].as_str().expect("color id").to_string()
}
