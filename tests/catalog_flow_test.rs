mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{seed_color, seed_language, TestApp};

#[tokio::test]
async fn catalog_create_and_aggregated_get() {
    let app = TestApp::new().await;
    seed_language(&app, "en", "English").await;
    seed_language(&app, "de", "German").await;
    let red = seed_color(&app, "Red", "#ff0000").await;
    let blue = seed_color(&app, "Blue", "#0000ff").await;

    let (status, created) = app
        .post(
            "/api/v1/catalogs",
            json!({
                "price": "19.99",
                "currency": "eur",
                "localizations": [
                    { "language_code": "en", "name": "Teapot", "description": "A teapot" },
                    { "language_code": "de", "name": "Teekanne", "description": null }
                ],
                "color_ids": [red, blue]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", created);
    assert_eq!(created["currency"], "EUR");
    let id = created["id"].as_str().expect("catalog id");

    let (status, fetched) = app.get(&format!("/api/v1/catalogs/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["localizations"].as_array().unwrap().len(), 2);
    assert_eq!(fetched["colors"].as_array().unwrap().len(), 2);

    // lang filter narrows localizations to one language
    let (status, german) = app.get(&format!("/api/v1/catalogs/{}?lang=de", id)).await;
    assert_eq!(status, StatusCode::OK);
    let locs = german["localizations"].as_array().unwrap();
    assert_eq!(locs.len(), 1);
    assert_eq!(locs[0]["name"], "Teekanne");
}

#[tokio::test]
async fn catalog_update_replaces_localizations_and_colors() {
    let app = TestApp::new().await;
    seed_language(&app, "en", "English").await;
    let red = seed_color(&app, "Red", "#ff0000").await;
    let green = seed_color(&app, "Green", "#00ff00").await;

    let (_, created) = app
        .post(
            "/api/v1/catalogs",
            json!({
                "price": "5.00",
                "localizations": [{ "language_code": "en", "name": "Mug" }],
                "color_ids": [red]
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = app
        .put(
            &format!("/api/v1/catalogs/{}", id),
            json!({
                "price": "7.50",
                "localizations": [{ "language_code": "en", "name": "Big Mug" }],
                "color_ids": [green]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {}", updated);
    assert_eq!(updated["localizations"][0]["name"], "Big Mug");
    let colors = updated["colors"].as_array().unwrap();
    assert_eq!(colors.len(), 1);
    assert_eq!(colors[0]["name"], "Green");
}

#[tokio::test]
async fn catalog_create_rolls_back_on_unknown_language() {
    let app = TestApp::new().await;
    seed_language(&app, "en", "English").await;

    let (status, _) = app
        .post(
            "/api/v1/catalogs",
            json!({
                "price": "5.00",
                "localizations": [
                    { "language_code": "en", "name": "Mug" },
                    { "language_code": "xx", "name": "Nope" }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // nothing was half-written
    let (status, page) = app.get("/api/v1/catalogs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn catalog_list_pagination_and_filters() {
    let app = TestApp::new().await;
    seed_language(&app, "en", "English").await;

    for i in 0..3 {
        let (status, _) = app
            .post(
                "/api/v1/catalogs",
                json!({
                    "price": "1.00",
                    "is_active": i != 0,
                    "localizations": [{ "language_code": "en", "name": format!("Item {}", i) }]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = app.get("/api/v1/catalogs?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["catalogs"].as_array().unwrap().len(), 2);

    let (_, active) = app.get("/api/v1/catalogs?is_active=true").await;
    assert_eq!(active["total"], 2);
}

#[tokio::test]
async fn catalog_missing_id_is_404() {
    let app = TestApp::new().await;
    let (status, body) = app
        .get("/api/v1/catalogs/00000000-0000-0000-0000-000000000000")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn catalog_delete_then_get_is_404() {
    let app = TestApp::new().await;
    seed_language(&app, "en", "English").await;

    let (_, created) = app
        .post(
            "/api/v1/catalogs",
            json!({
                "price": "2.00",
                "localizations": [{ "language_code": "en", "name": "Gone soon" }]
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = app.delete(&format!("/api/v1/catalogs/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/api/v1/catalogs/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_mutation_requires_token() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/catalogs",
            Some(json!({ "price": "1.00", "localizations": [] })),
            false,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
