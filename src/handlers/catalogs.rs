use axum::{
    extract::{Json, Path, Query, State},
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::categories::{collect_localizations, LocalizationRequest};
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, normalize_string, success_response,
    validate_input, ListParams,
};
use crate::services::catalogs::{CatalogFilter, CatalogInput, CatalogPage, CatalogUpdate, CatalogView};
use crate::AppState;

const DEFAULT_CURRENCY: &str = "USD";

pub fn catalogs_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_catalogs).post(create_catalog))
        .route(
            "/:id",
            get(get_catalog).put(update_catalog).delete(delete_catalog),
        )
}

fn ensure_price_non_negative(price: &Decimal) -> Result<(), ApiError> {
    if *price < Decimal::ZERO {
        Err(ApiError::ValidationError(
            "price cannot be negative".to_string(),
        ))
    } else {
        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCatalogRequest {
    pub price: Decimal,
    /// ISO currency code; defaults to USD
    pub currency: Option<String>,
    pub brand_id: Option<Uuid>,
    pub is_active: Option<bool>,
    #[validate(length(min = 1))]
    pub localizations: Vec<LocalizationRequest>,
    #[serde(default)]
    pub color_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCatalogRequest {
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    /// Present-and-null clears the brand
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Uuid>)]
    pub brand_id: Option<Option<Uuid>>,
    pub is_active: Option<bool>,
    pub localizations: Option<Vec<LocalizationRequest>>,
    pub color_ids: Option<Vec<Uuid>>,
}

/// Distinguishes an absent field from an explicit null.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CatalogListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Restrict localizations to this language code
    pub lang: Option<String>,
    pub is_active: Option<bool>,
    pub brand_id: Option<Uuid>,
}

/// Create a catalog with its localizations and color links in one shot.
#[utoipa::path(
    post,
    path = "/api/v1/catalogs",
    request_body = CreateCatalogRequest,
    responses(
        (status = 201, description = "Catalog created", body = CatalogView),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Catalogs"
)]
pub async fn create_catalog(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateCatalogRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;
    ensure_price_non_negative(&payload.price)?;

    let currency = payload
        .currency
        .map(|c| normalize_string(c).to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    let localizations = collect_localizations(payload.localizations)?;

    let created = state
        .services
        .catalogs
        .create(CatalogInput {
            price: payload.price,
            currency,
            brand_id: payload.brand_id,
            is_active: payload.is_active.unwrap_or(true),
            localizations,
            color_ids: payload.color_ids,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(created))
}

/// List catalogs with pagination, aggregated with localizations and colors.
#[utoipa::path(
    get,
    path = "/api/v1/catalogs",
    params(CatalogListParams),
    responses((status = 200, description = "Catalog page", body = CatalogPage)),
    tag = "Catalogs"
)]
pub async fn list_catalogs(
    State(state): State<AppState>,
    Query(params): Query<CatalogListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let page = state
        .services
        .catalogs
        .list(CatalogFilter {
            is_active: params.is_active,
            brand_id: params.brand_id,
            lang: params.lang,
            page: params.page,
            limit: params.limit,
        })
        .await
        .map_err(map_service_error)?;
    Ok(success_response(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/catalogs/{id}",
    params(
        ("id" = Uuid, Path, description = "Catalog ID"),
        ListParams
    ),
    responses(
        (status = 200, description = "Catalog", body = CatalogView),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Catalogs"
)]
pub async fn get_catalog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let catalog = state
        .services
        .catalogs
        .get(id, params.lang.as_deref())
        .await
        .map_err(map_service_error)?;
    Ok(success_response(catalog))
}

/// Update a catalog. Supplied localization or color sets replace the old ones.
#[utoipa::path(
    put,
    path = "/api/v1/catalogs/{id}",
    params(("id" = Uuid, Path, description = "Catalog ID")),
    request_body = UpdateCatalogRequest,
    responses(
        (status = 200, description = "Catalog updated", body = CatalogView),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Catalogs"
)]
pub async fn update_catalog(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCatalogRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    if let Some(ref price) = payload.price {
        ensure_price_non_negative(price)?;
    }
    let currency = payload
        .currency
        .map(|c| normalize_string(c).to_ascii_uppercase())
        .filter(|c| !c.is_empty());
    let localizations = payload
        .localizations
        .map(collect_localizations)
        .transpose()?;

    let updated = state
        .services
        .catalogs
        .update(
            id,
            CatalogUpdate {
                price: payload.price,
                currency,
                brand_id: payload.brand_id,
                is_active: payload.is_active,
                localizations,
                color_ids: payload.color_ids,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/catalogs/{id}",
    params(("id" = Uuid, Path, description = "Catalog ID")),
    responses(
        (status = 204, description = "Catalog deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Catalogs"
)]
pub async fn delete_catalog(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalogs
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
