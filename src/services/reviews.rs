use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder, Set,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{review, Review, ReviewModel};
use crate::errors::ServiceError;

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;
const MIN_RATING: i16 = 1;
const MAX_RATING: i16 = 5;

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewPage {
    pub reviews: Vec<ReviewModel>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Clone)]
pub struct ReviewService {
    db: Arc<DatabaseConnection>,
}

impl ReviewService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Records a review. Ratings outside 1..=5 are rejected.
    #[instrument(skip(self, body))]
    pub async fn create(
        &self,
        author: String,
        body: String,
        rating: i16,
    ) -> Result<ReviewModel, ServiceError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ServiceError::ValidationError(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let model = review::ActiveModel {
            id: Set(Uuid::new_v4()),
            author: Set(author),
            body: Set(body),
            rating: Set(rating),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(&*self.db).await?;
        info!("Created review: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<ReviewModel, ServiceError> {
        Review::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Review {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<ReviewPage, ServiceError> {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let paginator = Review::find()
            .order_by_desc(review::Column::CreatedAt)
            .paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let reviews = paginator.fetch_page(page - 1).await?;

        Ok(ReviewPage {
            reviews,
            total,
            page,
            limit,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        existing.delete(&*self.db).await?;
        info!("Deleted review: {}", id);
        Ok(())
    }
}
