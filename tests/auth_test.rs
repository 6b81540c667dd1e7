mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;

use common::{TestApp, ADMIN_EMAIL, ADMIN_PASSWORD};

#[tokio::test]
async fn login_returns_token_and_me_works() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            false,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    let token = body["token"].as_str().expect("token");
    assert!(body["user"].get("password_hash").is_none());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, me) = app.raw(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": "nope-nope" })),
            false,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/brands")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "Acme" }).to_string()))
        .unwrap();
    let (status, _) = app.raw(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_bearer_scheme_is_unauthorized() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/brands")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "Acme" }).to_string()))
        .unwrap();
    let (status, _) = app.raw(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_is_admin_only() {
    let app = TestApp::new().await;

    // admin registers a regular user
    let (status, _) = app
        .post(
            "/api/v1/auth/register",
            json!({
                "email": "staff@example.com",
                "password": "password123",
                "name": "Staff"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // the regular user's token cannot register further accounts
    let (_, login) = app
        .request(
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({ "email": "staff@example.com", "password": "password123" })),
            false,
        )
        .await;
    let staff_token = login["token"].as_str().unwrap();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/register")
        .header(header::AUTHORIZATION, format!("Bearer {}", staff_token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "email": "intruder@example.com",
                "password": "password123",
                "name": "Intruder"
            })
            .to_string(),
        ))
        .unwrap();
    let (status, _) = app.raw(request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/v1/auth/register",
            json!({
                "email": ADMIN_EMAIL,
                "password": "password123",
                "name": "Clone"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
