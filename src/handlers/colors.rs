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
use crate::entities::ColorModel;
use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, normalize_string, success_response,
    validate_input,
};
use crate::AppState;

pub fn colors_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_colors).post(create_color))
        .route(
            "/:id",
            get(get_color).put(update_color).delete(delete_color),
        )
}

fn validate_hex(hex: &str) -> Result<(), ApiError> {
    let valid = hex.len() == 7
        && hex.starts_with('#')
        && hex[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(ApiError::ValidationError(
            "Hex color must look like #RRGGBB".to_string(),
        ))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateColorRequest {
    #[validate(length(min = 1))]
    pub name: String,
    /// Hex value in #RRGGBB form
    pub hex: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateColorRequest {
    pub name: Option<String>,
    pub hex: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/colors",
    request_body = CreateColorRequest,
    responses(
        (status = 201, description = "Color created", body = ColorModel),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Colors"
)]
pub async fn create_color(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateColorRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = normalize_string(payload.name);
    let hex = normalize_string(payload.hex).to_ascii_lowercase();
    validate_hex(&hex)?;

    let created = state
        .services
        .colors
        .create(name, hex)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/colors",
    responses((status = 200, description = "All colors", body = [ColorModel])),
    tag = "Colors"
)]
pub async fn list_colors(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let colors = state.services.colors.list().await.map_err(map_service_error)?;
    Ok(success_response(colors))
}

#[utoipa::path(
    get,
    path = "/api/v1/colors/{id}",
    params(("id" = Uuid, Path, description = "Color ID")),
    responses(
        (status = 200, description = "Color", body = ColorModel),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Colors"
)]
pub async fn get_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let color = state
        .services
        .colors
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(color))
}

#[utoipa::path(
    put,
    path = "/api/v1/colors/{id}",
    params(("id" = Uuid, Path, description = "Color ID")),
    request_body = UpdateColorRequest,
    responses(
        (status = 200, description = "Color updated", body = ColorModel),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Colors"
)]
pub async fn update_color(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateColorRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = payload.name.map(normalize_string);
    if let Some(ref name) = name {
        if name.is_empty() {
            return Err(ApiError::ValidationError(
                "Color name cannot be blank".to_string(),
            ));
        }
    }
    let hex = payload
        .hex
        .map(|h| normalize_string(h).to_ascii_lowercase());
    if let Some(ref hex) = hex {
        validate_hex(hex)?;
    }

    let updated = state
        .services
        .colors
        .update(id, name, hex)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/colors/{id}",
    params(("id" = Uuid, Path, description = "Color ID")),
    responses(
        (status = 204, description = "Color deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Colors"
)]
pub async fn delete_color(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .colors
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
