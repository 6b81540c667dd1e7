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
    created_response, map_service_error, no_content_response, success_response, validate_input,
    ListParams,
};
use crate::services::items::{ItemFilter, ItemInput, ItemPage, ItemUpdate, ItemView};
use crate::AppState;

pub fn items_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
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
pub struct CreateItemRequest {
    pub category_id: Uuid,
    pub collection_id: Option<Uuid>,
    pub price: Option<Decimal>,
    #[validate(length(min = 1))]
    pub localizations: Vec<LocalizationRequest>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItemRequest {
    pub category_id: Option<Uuid>,
    /// Present-and-null detaches the item from its collection
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Uuid>)]
    pub collection_id: Option<Option<Uuid>>,
    /// Present-and-null clears the price
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<Decimal>)]
    pub price: Option<Option<Decimal>>,
    pub localizations: Option<Vec<LocalizationRequest>>,
}

fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ItemListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Restrict localizations to this language code
    pub lang: Option<String>,
    pub category_id: Option<Uuid>,
    pub collection_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/v1/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemView),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Items"
)]
pub async fn create_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    if let Some(ref price) = payload.price {
        ensure_price_non_negative(price)?;
    }
    let localizations = collect_localizations(payload.localizations)?;

    let created = state
        .services
        .items
        .create(ItemInput {
            category_id: payload.category_id,
            collection_id: payload.collection_id,
            price: payload.price,
            localizations,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/items",
    params(ItemListParams),
    responses((status = 200, description = "Item page", body = ItemPage)),
    tag = "Items"
)]
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let page = state
        .services
        .items
        .list(ItemFilter {
            category_id: params.category_id,
            collection_id: params.collection_id,
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
    path = "/api/v1/items/{id}",
    params(
        ("id" = Uuid, Path, description = "Item ID"),
        ListParams
    ),
    responses(
        (status = 200, description = "Item", body = ItemView),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Items"
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let item = state
        .services
        .items
        .get(id, params.lang.as_deref())
        .await
        .map_err(map_service_error)?;
    Ok(success_response(item))
}

#[utoipa::path(
    put,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemView),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Items"
)]
pub async fn update_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    if let Some(Some(ref price)) = payload.price {
        ensure_price_non_negative(price)?;
    }
    let localizations = payload
        .localizations
        .map(collect_localizations)
        .transpose()?;

    let updated = state
        .services
        .items
        .update(
            id,
            ItemUpdate {
                category_id: payload.category_id,
                collection_id: payload.collection_id,
                price: payload.price,
                localizations,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(updated))
}

#[utoipa::path(
    delete,
    path = "/api/v1/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Items"
)]
pub async fn delete_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .items
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
