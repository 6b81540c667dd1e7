use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use super::LocalizedText;
use crate::entities::{
    item, item_localization, photo, Category, Collection, Item, ItemLocalization, ItemModel,
    Language, Photo, PhotoModel,
};
use crate::errors::ServiceError;

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

/// Item aggregated with its localizations and photos.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: ItemModel,
    pub localizations: Vec<LocalizedText>,
    pub photos: Vec<PhotoModel>,
}

#[derive(Clone, Debug)]
pub struct ItemInput {
    pub category_id: Uuid,
    pub collection_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub localizations: Vec<LocalizedText>,
}

#[derive(Clone, Debug, Default)]
pub struct ItemUpdate {
    pub category_id: Option<Uuid>,
    pub collection_id: Option<Option<Uuid>>,
    pub price: Option<Option<Decimal>>,
    pub localizations: Option<Vec<LocalizedText>>,
}

#[derive(Clone, Debug, Default)]
pub struct ItemFilter {
    pub category_id: Option<Uuid>,
    pub collection_id: Option<Uuid>,
    pub lang: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemPage {
    pub items: Vec<ItemView>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Clone)]
pub struct ItemService {
    db: Arc<DatabaseConnection>,
}

impl ItemService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: ItemInput) -> Result<ItemView, ServiceError> {
        self.ensure_category_exists(input.category_id).await?;
        if let Some(collection_id) = input.collection_id {
            self.ensure_collection_exists(collection_id).await?;
        }
        self.ensure_languages_exist(&input.localizations).await?;

        let item_id = Uuid::new_v4();
        let txn = self.db.begin().await?;

        item::ActiveModel {
            id: Set(item_id),
            category_id: Set(input.category_id),
            collection_id: Set(input.collection_id),
            price: Set(input.price),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        }
        .insert(&txn)
        .await?;

        for loc in &input.localizations {
            item_localization::ActiveModel {
                id: Set(Uuid::new_v4()),
                item_id: Set(item_id),
                language_code: Set(loc.language_code.clone()),
                name: Set(loc.name.clone()),
                description: Set(loc.description.clone()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Created item: {}", item_id);

        self.get(item_id, None).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid, lang: Option<&str>) -> Result<ItemView, ServiceError> {
        let item = Item::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;

        let mut loc_query = item.find_related(ItemLocalization);
        if let Some(lang) = lang {
            loc_query = loc_query.filter(item_localization::Column::LanguageCode.eq(lang));
        }
        let localizations = loc_query.all(&*self.db).await?;
        let photos = item
            .find_related(Photo)
            .order_by_asc(photo::Column::SortOrder)
            .all(&*self.db)
            .await?;

        Ok(ItemView {
            item,
            localizations: localizations.into_iter().map(to_localized_text).collect(),
            photos,
        })
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: ItemFilter) -> Result<ItemPage, ServiceError> {
        let page = filter.page.unwrap_or(1).max(1);
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let mut query = Item::find().order_by_desc(item::Column::CreatedAt);
        if let Some(category_id) = filter.category_id {
            query = query.filter(item::Column::CategoryId.eq(category_id));
        }
        if let Some(collection_id) = filter.collection_id {
            query = query.filter(item::Column::CollectionId.eq(collection_id));
        }

        let paginator = query.paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page - 1).await?;

        let localizations = items.load_many(ItemLocalization, &*self.db).await?;
        let photos = items.load_many(Photo, &*self.db).await?;

        let lang = filter.lang.as_deref();
        let views = items
            .into_iter()
            .zip(localizations)
            .zip(photos)
            .map(|((item, locs), photos)| ItemView {
                item,
                localizations: locs
                    .into_iter()
                    .filter(|l| lang.map_or(true, |code| l.language_code == code))
                    .map(to_localized_text)
                    .collect(),
                photos,
            })
            .collect();

        Ok(ItemPage {
            items: views,
            total,
            page,
            limit,
        })
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: ItemUpdate) -> Result<ItemView, ServiceError> {
        let existing = Item::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;

        if let Some(category_id) = input.category_id {
            self.ensure_category_exists(category_id).await?;
        }
        if let Some(Some(collection_id)) = input.collection_id {
            self.ensure_collection_exists(collection_id).await?;
        }
        if let Some(ref locs) = input.localizations {
            self.ensure_languages_exist(locs).await?;
        }

        let txn = self.db.begin().await?;

        let mut active: item::ActiveModel = existing.into();
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(collection_id) = input.collection_id {
            active.collection_id = Set(collection_id);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        active.updated_at = Set(Some(Utc::now()));
        active.update(&txn).await?;

        if let Some(locs) = &input.localizations {
            ItemLocalization::delete_many()
                .filter(item_localization::Column::ItemId.eq(id))
                .exec(&txn)
                .await?;
            for loc in locs {
                item_localization::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    item_id: Set(id),
                    language_code: Set(loc.language_code.clone()),
                    name: Set(loc.name.clone()),
                    description: Set(loc.description.clone()),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;
        info!("Updated item: {}", id);

        self.get(id, None).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = Item::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", id)))?;
        existing.delete(&*self.db).await?;
        info!("Deleted item: {}", id);
        Ok(())
    }

    async fn ensure_category_exists(&self, id: Uuid) -> Result<(), ServiceError> {
        if Category::find_by_id(id).one(&*self.db).await?.is_none() {
            return Err(ServiceError::InvalidInput(format!(
                "Unknown category id: {}",
                id
            )));
        }
        Ok(())
    }

    async fn ensure_collection_exists(&self, id: Uuid) -> Result<(), ServiceError> {
        if Collection::find_by_id(id).one(&*self.db).await?.is_none() {
            return Err(ServiceError::InvalidInput(format!(
                "Unknown collection id: {}",
                id
            )));
        }
        Ok(())
    }

    async fn ensure_languages_exist(&self, locs: &[LocalizedText]) -> Result<(), ServiceError> {
        for loc in locs {
            if Language::find_by_id(&loc.language_code)
                .one(&*self.db)
                .await?
                .is_none()
            {
                return Err(ServiceError::InvalidInput(format!(
                    "Unknown language code: {}",
                    loc.language_code
                )));
            }
        }
        Ok(())
    }
}

fn to_localized_text(model: item_localization::Model) -> LocalizedText {
    LocalizedText {
        language_code: model.language_code,
        name: model.name,
        description: model.description,
    }
}
