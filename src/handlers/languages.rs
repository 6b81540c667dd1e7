use axum::{
    extract::{Json, Path, State},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::AuthUser;
use crate::entities::LanguageModel;
use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, normalize_string, success_response,
    validate_input,
};
use crate::AppState;

pub fn languages_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_languages).post(create_language))
        .route("/:code", get(get_language).delete(delete_language))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLanguageRequest {
    /// ISO language code, e.g. "en"
    #[validate(length(min = 2, max = 8))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/languages",
    request_body = CreateLanguageRequest,
    responses(
        (status = 201, description = "Language created", body = LanguageModel),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 409, description = "Code already exists", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Languages"
)]
pub async fn create_language(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateLanguageRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let code = normalize_string(payload.code).to_ascii_lowercase();
    let name = normalize_string(payload.name);
    if name.is_empty() {
        return Err(ApiError::ValidationError(
            "Language name cannot be blank".to_string(),
        ));
    }

    let created = state
        .services
        .languages
        .create(code, name)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/languages",
    responses((status = 200, description = "All languages", body = [LanguageModel])),
    tag = "Languages"
)]
pub async fn list_languages(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let languages = state
        .services
        .languages
        .list()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(languages))
}

#[utoipa::path(
    get,
    path = "/api/v1/languages/{code}",
    params(("code" = String, Path, description = "Language code")),
    responses(
        (status = 200, description = "Language", body = LanguageModel),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Languages"
)]
pub async fn get_language(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let language = state
        .services
        .languages
        .get(&code)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(language))
}

/// Delete a language. Refused while localizations still reference it.
#[utoipa::path(
    delete,
    path = "/api/v1/languages/{code}",
    params(("code" = String, Path, description = "Language code")),
    responses(
        (status = 204, description = "Language deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Language still referenced", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Languages"
)]
pub async fn delete_language(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .languages
        .delete(&code)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
