use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::entities::PhotoModel;
use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response,
};
use crate::services::photos::UploadInput;
use crate::AppState;

/// Headroom on top of the configured file cap for multipart boundaries and
/// the small attachment fields, so the handler's own size check is the one
/// that rejects oversized files.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn uploads_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/images", post(upload_image).get(list_images))
        .route("/images/:id", get(get_image).delete(delete_image))
        .layer(DefaultBodyLimit::max(
            max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
}

/// Accept a multipart image upload. The `file` part carries the image;
/// optional `collection_id`, `item_id` and `sort_order` parts attach it.
#[utoipa::path(
    post,
    path = "/api/v1/uploads/images",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Photo stored", body = PhotoModel),
        (status = 400, description = "Invalid upload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Uploads"
)]
pub async fn upload_image(
    _user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let max_bytes = state.config.max_upload_bytes;

    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut collection_id: Option<Uuid> = None;
    let mut item_id: Option<Uuid> = None;
    let mut sort_order: i32 = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(|n| n.to_string())
                    .ok_or_else(|| ApiError::BadRequest("File part must have a name".into()))?;
                let content_type = field.content_type().map(|c| c.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                if bytes.len() > max_bytes {
                    return Err(ApiError::ValidationError(format!(
                        "File exceeds the {} byte upload limit",
                        max_bytes
                    )));
                }
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            "collection_id" => {
                collection_id = Some(parse_uuid_field(field, "collection_id").await?);
            }
            "item_id" => {
                item_id = Some(parse_uuid_field(field, "item_id").await?);
            }
            "sort_order" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Unreadable sort_order: {}", e)))?;
                sort_order = text
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::ValidationError("sort_order must be an integer".into()))?;
            }
            other => {
                return Err(ApiError::BadRequest(format!(
                    "Unexpected multipart field: {}",
                    other
                )));
            }
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("Missing file part".into()))?;

    let photo = state
        .services
        .photos
        .save_upload(
            UploadInput {
                file_name,
                content_type,
                collection_id,
                item_id,
                sort_order,
            },
            bytes,
        )
        .await
        .map_err(map_service_error)?;

    Ok(created_response(photo))
}

#[utoipa::path(
    get,
    path = "/api/v1/uploads/images",
    responses((status = 200, description = "All photos", body = [PhotoModel])),
    tag = "Uploads"
)]
pub async fn list_images(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let photos = state.services.photos.list().await.map_err(map_service_error)?;
    Ok(success_response(photos))
}

#[utoipa::path(
    get,
    path = "/api/v1/uploads/images/{id}",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo", body = PhotoModel),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Uploads"
)]
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let photo = state
        .services
        .photos
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(photo))
}

/// Delete a photo record and its stored file.
#[utoipa::path(
    delete,
    path = "/api/v1/uploads/images/{id}",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Uploads"
)]
pub async fn delete_image(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .photos
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}

async fn parse_uuid_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<Uuid, ApiError> {
    let text = field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Unreadable {}: {}", name, e)))?;
    Uuid::parse_str(text.trim())
        .map_err(|_| ApiError::ValidationError(format!("{} must be a UUID", name)))
}
