use axum::{
    extract::{Json, Path, Query, State},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, normalize_optional_string,
    normalize_string, success_response, validate_input, ListParams,
};
use crate::services::categories::{CategoryInput, CategoryUpdate, CategoryView};
use crate::services::LocalizedText;
use crate::AppState;

pub fn categories_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LocalizationRequest {
    #[validate(length(min = 2, max = 8))]
    pub language_code: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

impl LocalizationRequest {
    pub fn into_localized_text(self) -> LocalizedText {
        LocalizedText {
            language_code: normalize_string(self.language_code).to_ascii_lowercase(),
            name: normalize_string(self.name),
            description: normalize_optional_string(self.description),
        }
    }
}

pub fn collect_localizations(
    requests: Vec<LocalizationRequest>,
) -> Result<Vec<LocalizedText>, ApiError> {
    let mut out = Vec::with_capacity(requests.len());
    for request in requests {
        validate_input(&request)?;
        let text = request.into_localized_text();
        if text.name.is_empty() {
            return Err(ApiError::ValidationError(
                "Localized name cannot be blank".to_string(),
            ));
        }
        if out
            .iter()
            .any(|t: &LocalizedText| t.language_code == text.language_code)
        {
            return Err(ApiError::ValidationError(format!(
                "Duplicate localization for language {}",
                text.language_code
            )));
        }
        out.push(text);
    }
    Ok(out)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub localizations: Vec<LocalizationRequest>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub position: Option<i32>,
    pub localizations: Option<Vec<LocalizationRequest>>,
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryView),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = normalize_string(payload.name);
    if name.is_empty() {
        return Err(ApiError::ValidationError(
            "Category name cannot be blank".to_string(),
        ));
    }
    let localizations = collect_localizations(payload.localizations)?;

    let created = state
        .services
        .categories
        .create(CategoryInput {
            name,
            position: payload.position,
            localizations,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(ListParams),
    responses((status = 200, description = "All categories", body = [CategoryView])),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let categories = state
        .services
        .categories
        .list(params.lang.as_deref())
        .await
        .map_err(map_service_error)?;
    Ok(success_response(categories))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        ListParams
    ),
    responses(
        (status = 200, description = "Category", body = CategoryView),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let category = state
        .services
        .categories
        .get(id, params.lang.as_deref())
        .await
        .map_err(map_service_error)?;
    Ok(success_response(category))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryView),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already exists", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Categories"
)]
pub async fn update_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = payload.name.map(normalize_string);
    if let Some(ref name) = name {
        if name.is_empty() {
            return Err(ApiError::ValidationError(
                "Category name cannot be blank".to_string(),
            ));
        }
    }
    let localizations = payload
        .localizations
        .map(collect_localizations)
        .transpose()?;

    let updated = state
        .services
        .categories
        .update(
            id,
            CategoryUpdate {
                name,
                position: payload.position,
                localizations,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .categories
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
