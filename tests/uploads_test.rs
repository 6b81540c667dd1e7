mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};

use common::TestApp;

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn multipart_body(file_name: &str, content: &[u8], extra_fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(b"\r\n");
    for (name, value) in extra_fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(app: &TestApp, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/uploads/images")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn image_upload_round_trip() {
    let app = TestApp::new().await;

    let body = multipart_body("photo.png", b"\x89PNG fake image bytes", &[]);
    let (status, created) = app.raw(upload_request(&app, body)).await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", created);
    assert_eq!(created["file_name"], "photo.png");
    let url = created["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = app.get(&format!("/api/v1/uploads/images/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["url"], url);

    let (status, _) = app.delete(&format!("/api/v1/uploads/images/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/api/v1/uploads/images/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_larger_than_default_body_limit_succeeds_under_cap() {
    let app = TestApp::new().await;

    // 3 MiB is over axum's built-in 2 MB body limit but well under the
    // configured cap, so it must be accepted.
    let content = vec![0x42u8; 3 * 1024 * 1024];
    let body = multipart_body("big.png", &content, &[]);
    let (status, created) = app.raw(upload_request(&app, body)).await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", created);
    assert_eq!(created["file_name"], "big.png");
}

#[tokio::test]
async fn upload_over_configured_cap_is_rejected() {
    let app = TestApp::new().await;

    // one KiB past the default 8 MiB cap
    let content = vec![0x42u8; 8 * 1024 * 1024 + 1024];
    let body = multipart_body("huge.png", &content, &[]);
    let (status, rejected) = app.raw(upload_request(&app, body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", rejected);
    assert!(rejected["message"]
        .as_str()
        .unwrap()
        .contains("upload limit"));
}

#[tokio::test]
async fn upload_rejects_non_image_extension() {
    let app = TestApp::new().await;

    let body = multipart_body("script.exe", b"MZ...", &[]);
    let (status, _) = app.raw(upload_request(&app, body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_requires_auth() {
    let app = TestApp::new().await;

    let body = multipart_body("photo.png", b"\x89PNG", &[]);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/uploads/images")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, _) = app.raw(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn upload_attaches_to_collection() {
    let app = TestApp::new().await;

    let (_, collection) = app
        .post("/api/v1/collections", serde_json::json!({ "name": "Gallery" }))
        .await;
    let collection_id = collection["id"].as_str().unwrap();

    let body = multipart_body(
        "cover.jpg",
        b"fake jpeg",
        &[("collection_id", collection_id), ("sort_order", "2")],
    );
    let (status, photo) = app.raw(upload_request(&app, body)).await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", photo);
    assert_eq!(photo["collection_id"], collection_id);
    assert_eq!(photo["sort_order"], 2);

    // the photo shows up in the collection's aggregated view
    let (_, fetched) = app
        .get(&format!("/api/v1/collections/{}", collection_id))
        .await;
    assert_eq!(fetched["photos"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn upload_to_unknown_collection_is_rejected() {
    let app = TestApp::new().await;

    let body = multipart_body(
        "cover.jpg",
        b"fake jpeg",
        &[("collection_id", "00000000-0000-0000-0000-000000000000")],
    );
    let (status, _) = app.raw(upload_request(&app, body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
