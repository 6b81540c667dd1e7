mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{seed_language, TestApp};

#[tokio::test]
async fn review_can_be_posted_without_auth() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/reviews",
            Some(json!({ "author": "Ada", "body": "Lovely shop", "rating": 5 })),
            false,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    assert_eq!(body["rating"], 5);
}

#[tokio::test]
async fn review_rating_out_of_range_is_rejected() {
    let app = TestApp::new().await;

    for rating in [0, 6] {
        let (status, _) = app
            .request(
                Method::POST,
                "/api/v1/reviews",
                Some(json!({ "author": "Ada", "body": "Hmm", "rating": rating })),
                false,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {}", rating);
    }
}

#[tokio::test]
async fn review_delete_requires_auth() {
    let app = TestApp::new().await;

    let (_, created) = app
        .request(
            Method::POST,
            "/api/v1/reviews",
            Some(json!({ "author": "Ada", "body": "Spam", "rating": 1 })),
            false,
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/v1/reviews/{}", id), None, false)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.delete(&format!("/api/v1/reviews/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn review_list_is_paginated() {
    let app = TestApp::new().await;

    for i in 0..3 {
        let (status, _) = app
            .request(
                Method::POST,
                "/api/v1/reviews",
                Some(json!({ "author": format!("User {}", i), "body": "ok", "rating": 4 })),
                false,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = app.get("/api/v1/reviews?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["reviews"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn language_delete_blocked_while_referenced() {
    let app = TestApp::new().await;
    seed_language(&app, "en", "English").await;

    let (_, _) = app
        .post(
            "/api/v1/categories",
            json!({
                "name": "Kitchen",
                "localizations": [{ "language_code": "en", "name": "Kitchen" }]
            }),
        )
        .await;

    let (status, body) = app.delete("/api/v1/languages/en").await;
    assert_eq!(status, StatusCode::CONFLICT, "body: {}", body);

    // removing the referencing category frees the language
    let (_, categories) = app.get("/api/v1/categories").await;
    let category_id = categories[0]["id"].as_str().unwrap();
    let (status, _) = app
        .delete(&format!("/api/v1/categories/{}", category_id))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.delete("/api/v1/languages/en").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn language_delete_blocked_by_item_and_vacancy_texts() {
    let app = TestApp::new().await;
    seed_language(&app, "en", "English").await;

    let (_, category) = app
        .post("/api/v1/categories", json!({ "name": "Misc" }))
        .await;
    let category_id = category["id"].as_str().unwrap();

    let (status, _) = app
        .post(
            "/api/v1/items",
            json!({
                "category_id": category_id,
                "localizations": [{ "language_code": "en", "name": "Lamp" }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post(
            "/api/v1/vacancies",
            json!({
                "localizations": [{ "language_code": "en", "title": "Designer" }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.delete("/api/v1/languages/en").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn language_codes_are_normalized() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/v1/languages", json!({ "code": " EN ", "name": "English" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], "en");

    let (status, _) = app
        .post("/api/v1/languages", json!({ "code": "en", "name": "English" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
