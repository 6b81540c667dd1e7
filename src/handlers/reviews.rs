use axum::{
    extract::{Json, Path, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::entities::ReviewModel;
use crate::errors::ApiError;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, normalize_string, success_response,
    validate_input, ListParams,
};
use crate::services::reviews::ReviewPage;
use crate::AppState;

pub fn reviews_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route("/:id", get(get_review).delete(delete_review))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, max = 120))]
    pub author: String,
    #[validate(length(min = 1))]
    pub body: String,
    /// Star rating from 1 to 5
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
}

/// Submit a review. This endpoint is public.
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewModel),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let author = normalize_string(payload.author);
    let body = payload.body.trim().to_string();
    if author.is_empty() || body.is_empty() {
        return Err(ApiError::ValidationError(
            "Author and body cannot be blank".to_string(),
        ));
    }

    let created = state
        .services
        .reviews
        .create(author, body, payload.rating)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(created))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    params(ListParams),
    responses((status = 200, description = "Review page", body = ReviewPage)),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let page = state
        .services
        .reviews
        .list(params.page, params.limit)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review", body = ReviewModel),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Reviews"
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let review = state
        .services
        .reviews
        .get(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(review))
}

/// Remove a review. Moderation requires authentication.
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Reviews"
)]
pub async fn delete_review(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .reviews
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(no_content_response())
}
