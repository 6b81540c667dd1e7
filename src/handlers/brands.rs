use axum::{
    extract::{Json, Path, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::entities::BrandModel;
use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, normalize_optional_string,
    normalize_string, success_response, validate_input,
};
use crate::AppState;

pub fn brands_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_brands).post(create_brand))
        .route(
            "/:id",
            get(get_brand).put(update_brand).delete(delete_brand),
        )
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBrandRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(url)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBrandRequest {
    pub name: Option<String>,
    /// Present-and-null clears the logo
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub logo_url: Option<Option<String>>,
}

fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[utoipa::path(
    post,
    path = "/api/v1/brands",
    request_body = CreateBrandRequest,
    responses(
        (status = 201, description = "Brand created", body = BrandModel),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Brands"
)]
pub async fn create_brand(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateBrandRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = normalize_string(payload.name);
    if name.is_empty() {
        return Err(ApiError::ValidationError(
            "Brand name cannot be blank".to_string(),
        ));
    }
    let logo_url = normalize_optional_string(payload.logo_url);

    let created = state
        .services
        .brands
        .create(name, logo_url)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/brands",
    responses((status = 200, description = "All brands", body = [BrandModel])),
    tag = "Brands"
)]
pub async fn list_brands(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let brands = state.services.brands.list().await.map_err(map_service_error)?;
    Ok(success_response(brands))
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/{id}",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand", body = BrandModel),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Brands"
)]
pub async fn get_brand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let brand = state
        .services
        .brands
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(brand))
}

#[utoipa::path(
    put,
    path = "/api/v1/brands/{id}",
    params(("id" = Uuid, Path, description = "Brand ID")),
    request_body = UpdateBrandRequest,
    responses(
        (status = 200, description = "Brand updated", body = BrandModel),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Brands"
)]
pub async fn update_brand(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBrandRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = payload.name.map(normalize_string);
    if let Some(ref name) = name {
        if name.is_empty() {
            return Err(ApiError::ValidationError(
                "Brand name cannot be blank".to_string(),
            ));
        }
    }
    let logo_url = match payload.logo_url {
        Some(value) => {
            let value = normalize_optional_string(value);
            if let Some(ref url) = value {
                if !validator::validate_url(url) {
                    return Err(ApiError::ValidationError(
                        "logo_url must be a valid URL".to_string(),
                    ));
                }
            }
            Some(value)
        }
        None => None,
    };

    let updated = state
        .services
        .brands
        .update(id, name, logo_url)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/brands/{id}",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Brands"
)]
pub async fn delete_brand(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .brands
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
