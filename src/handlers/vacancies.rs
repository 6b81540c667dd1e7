use axum::{
    extract::{Json, Path, Query, State},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, normalize_optional_string,
    normalize_string, success_response, validate_input, ListParams,
};
use crate::services::vacancies::{VacancyText, VacancyView};
use crate::AppState;

pub fn vacancies_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vacancies).post(create_vacancy))
        .route(
            "/:id",
            get(get_vacancy).put(update_vacancy).delete(delete_vacancy),
        )
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VacancyTextRequest {
    #[validate(length(min = 2, max = 8))]
    pub language_code: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
}

fn collect_vacancy_texts(
    requests: Vec<VacancyTextRequest>,
) -> Result<Vec<VacancyText>, ApiError> {
    let mut out: Vec<VacancyText> = Vec::with_capacity(requests.len());
    for request in requests {
        validate_input(&request)?;
        let text = VacancyText {
            language_code: normalize_string(request.language_code).to_ascii_lowercase(),
            title: normalize_string(request.title),
            description: normalize_optional_string(request.description),
        };
        if text.title.is_empty() {
            return Err(ApiError::ValidationError(
                "Vacancy title cannot be blank".to_string(),
            ));
        }
        if out.iter().any(|t| t.language_code == text.language_code) {
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
pub struct CreateVacancyRequest {
    pub is_open: Option<bool>,
    #[validate(length(min = 1))]
    pub localizations: Vec<VacancyTextRequest>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVacancyRequest {
    pub is_open: Option<bool>,
    pub localizations: Option<Vec<VacancyTextRequest>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct VacancyListParams {
    /// Only return open vacancies
    pub open_only: Option<bool>,
    /// Restrict localizations to this language code
    pub lang: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/vacancies",
    request_body = CreateVacancyRequest,
    responses(
        (status = 201, description = "Vacancy created", body = VacancyView),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Vacancies"
)]
pub async fn create_vacancy(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateVacancyRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;
    let localizations = collect_vacancy_texts(payload.localizations)?;

    let created = state
        .services
        .vacancies
        .create(payload.is_open.unwrap_or(true), localizations)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/vacancies",
    params(VacancyListParams),
    responses((status = 200, description = "All vacancies", body = [VacancyView])),
    tag = "Vacancies"
)]
pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(params): Query<VacancyListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let vacancies = state
        .services
        .vacancies
        .list(params.open_only.unwrap_or(false), params.lang.as_deref())
        .await
        .map_err(map_service_error)?;
    Ok(success_response(vacancies))
}

#[utoipa::path(
    get,
    path = "/api/v1/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID"),
        ListParams
    ),
    responses(
        (status = 200, description = "Vacancy", body = VacancyView),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Vacancies"
)]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let vacancy = state
        .services
        .vacancies
        .get(id, params.lang.as_deref())
        .await
        .map_err(map_service_error)?;
    Ok(success_response(vacancy))
}

#[utoipa::path(
    put,
    path = "/api/v1/vacancies/{id}",
    params(("id" = Uuid, Path, description = "Vacancy ID")),
    request_body = UpdateVacancyRequest,
    responses(
        (status = 200, description = "Vacancy updated", body = VacancyView),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Vacancies"
)]
pub async fn update_vacancy(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVacancyRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;
    let localizations = payload
        .localizations
        .map(collect_vacancy_texts)
        .transpose()?;

    let updated = state
        .services
        .vacancies
        .update(id, payload.is_open, localizations)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vacancies/{id}",
    params(("id" = Uuid, Path, description = "Vacancy ID")),
    responses(
        (status = 204, description = "Vacancy deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Vacancies"
)]
pub async fn delete_vacancy(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .vacancies
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
