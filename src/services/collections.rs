use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{
    collection, collection_color, photo, Collection, CollectionColor, CollectionModel, Color,
    ColorModel, Photo, PhotoModel,
};
use crate::errors::ServiceError;

/// Collection aggregated with its colors and photos.
#[derive(Debug, Serialize, ToSchema)]
pub struct CollectionView {
    #[serde(flatten)]
    pub collection: CollectionModel,
    pub colors: Vec<ColorModel>,
    pub photos: Vec<PhotoModel>,
}

#[derive(Clone)]
pub struct CollectionService {
    db: Arc<DatabaseConnection>,
}

impl CollectionService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        name: String,
        position: i32,
        color_ids: Vec<Uuid>,
    ) -> Result<CollectionView, ServiceError> {
        self.ensure_unique_name(&name, None).await?;
        self.ensure_colors_exist(&color_ids).await?;

        let collection_id = Uuid::new_v4();
        let txn = self.db.begin().await?;

        collection::ActiveModel {
            id: Set(collection_id),
            name: Set(name),
            position: Set(position),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&txn)
        .await?;

        for color_id in &color_ids {
            collection_color::ActiveModel {
                collection_id: Set(collection_id),
                color_id: Set(*color_id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Created collection: {}", collection_id);

        self.get(collection_id).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<CollectionView, ServiceError> {
        let collection = Collection::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Collection {} not found", id)))?;

        let colors = collection.find_related(Color).all(&*self.db).await?;
        let photos = collection
            .find_related(Photo)
            .order_by_asc(photo::Column::SortOrder)
            .all(&*self.db)
            .await?;

        Ok(CollectionView {
            collection,
            colors,
            photos,
        })
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CollectionView>, ServiceError> {
        let collections = Collection::find()
            .order_by_asc(collection::Column::Position)
            .all(&*self.db)
            .await?;

        let colors = collections
            .load_many_to_many(Color, CollectionColor, &*self.db)
            .await?;
        let photos = collections.load_many(Photo, &*self.db).await?;

        Ok(collections
            .into_iter()
            .zip(colors)
            .zip(photos)
            .map(|((collection, colors), photos)| CollectionView {
                collection,
                colors,
                photos,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        position: Option<i32>,
    ) -> Result<CollectionView, ServiceError> {
        if let Some(ref name) = name {
            self.ensure_unique_name(name, Some(id)).await?;
        }

        let existing = Collection::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Collection {} not found", id)))?;

        let mut active: collection::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(position) = position {
            active.position = Set(position);
        }
        active.updated_at = Set(Some(Utc::now()));
        active.update(&*self.db).await?;

        self.get(id).await
    }

    /// Replaces the collection's color set.
    #[instrument(skip(self))]
    pub async fn set_colors(
        &self,
        id: Uuid,
        color_ids: Vec<Uuid>,
    ) -> Result<CollectionView, ServiceError> {
        if Collection::find_by_id(id).one(&*self.db).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Collection {} not found",
                id
            )));
        }
        self.ensure_colors_exist(&color_ids).await?;

        let txn = self.db.begin().await?;

        CollectionColor::delete_many()
            .filter(collection_color::Column::CollectionId.eq(id))
            .exec(&txn)
            .await?;
        for color_id in &color_ids {
            collection_color::ActiveModel {
                collection_id: Set(id),
                color_id: Set(*color_id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Replaced colors for collection: {}", id);

        self.get(id).await
    }

    /// Deletes a collection. Items referencing it keep existing with their
    /// collection cleared, photos are detached the same way.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = Collection::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Collection {} not found", id)))?;
        existing.delete(&*self.db).await?;
        info!("Deleted collection: {}", id);
        Ok(())
    }

    async fn ensure_unique_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Collection::find().filter(collection::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(collection::Column::Id.ne(id));
        }
        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::AlreadyExists(format!(
                "Collection {} already exists",
                name
            )));
        }
        Ok(())
    }

    async fn ensure_colors_exist(&self, color_ids: &[Uuid]) -> Result<(), ServiceError> {
        for color_id in color_ids {
            if Color::find_by_id(*color_id).one(&*self.db).await?.is_none() {
                return Err(ServiceError::InvalidInput(format!(
                    "Unknown color id: {}",
                    color_id
                )));
            }
        }
        Ok(())
    }
}
