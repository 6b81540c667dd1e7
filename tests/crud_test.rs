mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{seed_color, seed_language, TestApp};

#[tokio::test]
async fn duplicate_brand_name_conflicts() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/v1/brands", json!({ "name": "Acme" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post("/api/v1/brands", json!({ "name": "Acme" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn duplicate_category_name_conflicts() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/v1/categories", json!({ "name": "Kitchen" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post("/api/v1/categories", json!({ "name": "Kitchen" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn duplicate_color_name_conflicts() {
    let app = TestApp::new().await;
    seed_color(&app, "Red", "#ff0000").await;

    let (status, _) = app
        .post("/api/v1/colors", json!({ "name": "Red", "hex": "#fe0000" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_hex_color_is_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/v1/colors", json!({ "name": "Odd", "hex": "red" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn item_create_requires_existing_category() {
    let app = TestApp::new().await;
    seed_language(&app, "en", "English").await;

    let (status, _) = app
        .post(
            "/api/v1/items",
            json!({
                "category_id": "00000000-0000-0000-0000-000000000000",
                "localizations": [{ "language_code": "en", "name": "Chair" }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn item_round_trip_with_category_and_collection() {
    let app = TestApp::new().await;
    seed_language(&app, "en", "English").await;

    let (_, category) = app
        .post("/api/v1/categories", json!({ "name": "Furniture" }))
        .await;
    let category_id = category["id"].as_str().unwrap();

    let (_, collection) = app
        .post("/api/v1/collections", json!({ "name": "Spring" }))
        .await;
    let collection_id = collection["id"].as_str().unwrap();

    let (status, created) = app
        .post(
            "/api/v1/items",
            json!({
                "category_id": category_id,
                "collection_id": collection_id,
                "price": "49.00",
                "localizations": [{ "language_code": "en", "name": "Chair" }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", created);
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = app.get(&format!("/api/v1/items/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["category_id"], category_id);
    assert_eq!(fetched["localizations"][0]["name"], "Chair");

    // filter listing by collection
    let (_, page) = app
        .get(&format!("/api/v1/items?collection_id={}", collection_id))
        .await;
    assert_eq!(page["total"], 1);
}

#[tokio::test]
async fn collection_color_set_replacement() {
    let app = TestApp::new().await;
    let red = seed_color(&app, "Red", "#ff0000").await;
    let blue = seed_color(&app, "Blue", "#0000ff").await;

    let (_, collection) = app
        .post(
            "/api/v1/collections",
            json!({ "name": "Summer", "color_ids": [red] }),
        )
        .await;
    let id = collection["id"].as_str().unwrap();
    assert_eq!(collection["colors"].as_array().unwrap().len(), 1);

    let (status, updated) = app
        .put(
            &format!("/api/v1/collections/{}/colors", id),
            json!({ "color_ids": [blue] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let colors = updated["colors"].as_array().unwrap();
    assert_eq!(colors.len(), 1);
    assert_eq!(colors[0]["name"], "Blue");
}

#[tokio::test]
async fn vacancy_round_trip_and_open_filter() {
    let app = TestApp::new().await;
    seed_language(&app, "en", "English").await;

    let (status, open) = app
        .post(
            "/api/v1/vacancies",
            json!({
                "localizations": [{ "language_code": "en", "title": "Backend Engineer" }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, closed) = app
        .post(
            "/api/v1/vacancies",
            json!({
                "is_open": false,
                "localizations": [{ "language_code": "en", "title": "Old Role" }]
            }),
        )
        .await;

    let (_, all) = app.get("/api/v1/vacancies").await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, open_only) = app.get("/api/v1/vacancies?open_only=true").await;
    let open_list = open_only.as_array().unwrap();
    assert_eq!(open_list.len(), 1);
    assert_eq!(open_list[0]["id"], open["id"]);

    let closed_id = closed["id"].as_str().unwrap();
    let (status, reopened) = app
        .put(
            &format!("/api/v1/vacancies/{}", closed_id),
            json!({ "is_open": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reopened["is_open"], true);
}

#[tokio::test]
async fn brand_round_trip_and_update() {
    let app = TestApp::new().await;

    let (_, created) = app
        .post(
            "/api/v1/brands",
            json!({ "name": "Acme", "logo_url": "https://example.com/acme.png" }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = app
        .put(&format!("/api/v1/brands/{}", id), json!({ "name": "Acme Co" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Acme Co");
    assert_eq!(updated["logo_url"], "https://example.com/acme.png");
}

#[tokio::test]
async fn brand_logo_cleared_with_explicit_null() {
    let app = TestApp::new().await;

    let (_, created) = app
        .post(
            "/api/v1/brands",
            json!({ "name": "Acme", "logo_url": "https://example.com/acme.png" }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = app
        .put(&format!("/api/v1/brands/{}", id), json!({ "logo_url": null }))
        .await;
    assert_eq!(status, StatusCode::OK, "body: {}", updated);
    assert!(updated["logo_url"].is_null());

    // an absent field still leaves the logo alone
    let (_, renamed) = app
        .put(&format!("/api/v1/brands/{}", id), json!({ "name": "Acme Co" }))
        .await;
    assert!(renamed["logo_url"].is_null());
}
