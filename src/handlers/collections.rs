use axum::{
    extract::{Json, Path, State},
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, normalize_string, success_response,
    validate_input,
};
use crate::services::collections::CollectionView;
use crate::AppState;

pub fn collections_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_collections).post(create_collection))
        .route(
            "/:id",
            get(get_collection)
                .put(update_collection)
                .delete(delete_collection),
        )
        .route("/:id/colors", put(set_collection_colors))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCollectionRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub color_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCollectionRequest {
    pub name: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetColorsRequest {
    pub color_ids: Vec<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/v1/collections",
    request_body = CreateCollectionRequest,
    responses(
        (status = 201, description = "Collection created", body = CollectionView),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Collections"
)]
pub async fn create_collection(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateCollectionRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = normalize_string(payload.name);
    if name.is_empty() {
        return Err(ApiError::ValidationError(
            "Collection name cannot be blank".to_string(),
        ));
    }

    let created = state
        .services
        .collections
        .create(name, payload.position, payload.color_ids)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/collections",
    responses((status = 200, description = "All collections", body = [CollectionView])),
    tag = "Collections"
)]
pub async fn list_collections(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let collections = state
        .services
        .collections
        .list()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(collections))
}

#[utoipa::path(
    get,
    path = "/api/v1/collections/{id}",
    params(("id" = Uuid, Path, description = "Collection ID")),
    responses(
        (status = 200, description = "Collection", body = CollectionView),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Collections"
)]
pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let collection = state
        .services
        .collections
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(collection))
}

#[utoipa::path(
    put,
    path = "/api/v1/collections/{id}",
    params(("id" = Uuid, Path, description = "Collection ID")),
    request_body = UpdateCollectionRequest,
    responses(
        (status = 200, description = "Collection updated", body = CollectionView),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Collections"
)]
pub async fn update_collection(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCollectionRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = payload.name.map(normalize_string);
    if let Some(ref name) = name {
        if name.is_empty() {
            return Err(ApiError::ValidationError(
                "Collection name cannot be blank".to_string(),
            ));
        }
    }

    let updated = state
        .services
        .collections
        .update(id, name, payload.position)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(updated))
}

/// Replace the collection's color set.
#[utoipa::path(
    put,
    path = "/api/v1/collections/{id}/colors",
    params(("id" = Uuid, Path, description = "Collection ID")),
    request_body = SetColorsRequest,
    responses(
        (status = 200, description = "Colors replaced", body = CollectionView),
        (status = 400, description = "Unknown color", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Collections"
)]
pub async fn set_collection_colors(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetColorsRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let updated = state
        .services
        .collections
        .set_colors(id, payload.color_ids)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/collections/{id}",
    params(("id" = Uuid, Path, description = "Collection ID")),
    responses(
        (status = 204, description = "Collection deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Collections"
)]
pub async fn delete_collection(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .collections
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
