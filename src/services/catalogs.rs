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
    catalog, catalog_color, catalog_localization, Brand, BrandModel, Catalog, CatalogColor,
    CatalogLocalization, CatalogModel, Color, ColorModel, Language,
};
use crate::errors::ServiceError;

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

/// Catalog aggregated with its localizations, colors and brand.
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogView {
    #[serde(flatten)]
    pub catalog: CatalogModel,
    pub localizations: Vec<LocalizedText>,
    pub colors: Vec<ColorModel>,
    pub brand: Option<BrandModel>,
}

#[derive(Clone, Debug)]
pub struct CatalogInput {
    pub price: Decimal,
    pub currency: String,
    pub brand_id: Option<Uuid>,
    pub is_active: bool,
    pub localizations: Vec<LocalizedText>,
    pub color_ids: Vec<Uuid>,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogUpdate {
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub brand_id: Option<Option<Uuid>>,
    pub is_active: Option<bool>,
    pub localizations: Option<Vec<LocalizedText>>,
    pub color_ids: Option<Vec<Uuid>>,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogFilter {
    pub is_active: Option<bool>,
    pub brand_id: Option<Uuid>,
    pub lang: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogPage {
    pub catalogs: Vec<CatalogView>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Inserts the catalog, its localizations and color links in one
    /// transaction. Any failure rolls the whole write back.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CatalogInput) -> Result<CatalogView, ServiceError> {
        self.validate_references(&input.localizations, &input.color_ids, input.brand_id)
            .await?;

        let catalog_id = Uuid::new_v4();
        let txn = self.db.begin().await?;

        let model = catalog::ActiveModel {
            id: Set(catalog_id),
            price: Set(input.price),
            currency: Set(input.currency.clone()),
            brand_id: Set(input.brand_id),
            is_active: Set(input.is_active),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };
        model.insert(&txn).await?;

        for loc in &input.localizations {
            catalog_localization::ActiveModel {
                id: Set(Uuid::new_v4()),
                catalog_id: Set(catalog_id),
                language_code: Set(loc.language_code.clone()),
                name: Set(loc.name.clone()),
                description: Set(loc.description.clone()),
            }
            .insert(&txn)
            .await?;
        }

        for color_id in &input.color_ids {
            catalog_color::ActiveModel {
                catalog_id: Set(catalog_id),
                color_id: Set(*color_id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Created catalog: {}", catalog_id);

        self.get(catalog_id, None).await
    }

    /// Fetches one catalog with localizations (optionally filtered by
    /// language), colors and brand.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid, lang: Option<&str>) -> Result<CatalogView, ServiceError> {
        let catalog = Catalog::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Catalog {} not found", id)))?;

        let mut loc_query = catalog.find_related(CatalogLocalization);
        if let Some(lang) = lang {
            loc_query = loc_query.filter(catalog_localization::Column::LanguageCode.eq(lang));
        }
        let localizations = loc_query.all(&*self.db).await?;
        let colors = catalog.find_related(Color).all(&*self.db).await?;
        let brand = match catalog.brand_id {
            Some(brand_id) => Brand::find_by_id(brand_id).one(&*self.db).await?,
            None => None,
        };

        Ok(CatalogView {
            catalog,
            localizations: localizations.into_iter().map(to_localized_text).collect(),
            colors,
            brand,
        })
    }

    /// Lists catalogs with pagination. Localizations and colors are loaded
    /// in bulk rather than per row.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: CatalogFilter) -> Result<CatalogPage, ServiceError> {
        let page = filter.page.unwrap_or(1).max(1);
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

        let mut query = Catalog::find().order_by_desc(catalog::Column::CreatedAt);
        if let Some(is_active) = filter.is_active {
            query = query.filter(catalog::Column::IsActive.eq(is_active));
        }
        if let Some(brand_id) = filter.brand_id {
            query = query.filter(catalog::Column::BrandId.eq(brand_id));
        }

        let paginator = query.paginate(&*self.db, limit);
        let total = paginator.num_items().await?;
        let catalogs = paginator.fetch_page(page - 1).await?;

        let localizations = catalogs.load_many(CatalogLocalization, &*self.db).await?;
        let colors = catalogs.load_many_to_many(Color, CatalogColor, &*self.db).await?;
        let brands = catalogs.load_one(Brand, &*self.db).await?;

        let lang = filter.lang.as_deref();
        let views = catalogs
            .into_iter()
            .zip(localizations)
            .zip(colors)
            .zip(brands)
            .map(|(((catalog, locs), colors), brand)| CatalogView {
                catalog,
                localizations: locs
                    .into_iter()
                    .filter(|l| lang.map_or(true, |code| l.language_code == code))
                    .map(to_localized_text)
                    .collect(),
                colors,
                brand,
            })
            .collect();

        Ok(CatalogPage {
            catalogs: views,
            total,
            page,
            limit,
        })
    }

    /// Updates catalog fields. Supplied localization or color sets replace
    /// the existing ones wholesale, inside one transaction.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: CatalogUpdate) -> Result<CatalogView, ServiceError> {
        let existing = Catalog::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Catalog {} not found", id)))?;

        if let Some(ref locs) = input.localizations {
            self.ensure_languages_exist(locs).await?;
        }
        if let Some(ref color_ids) = input.color_ids {
            self.ensure_colors_exist(color_ids).await?;
        }
        if let Some(Some(brand_id)) = input.brand_id {
            self.ensure_brand_exists(brand_id).await?;
        }

        let txn = self.db.begin().await?;

        let mut active: catalog::ActiveModel = existing.into();
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(currency) = input.currency {
            active.currency = Set(currency);
        }
        if let Some(brand_id) = input.brand_id {
            active.brand_id = Set(brand_id);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Some(Utc::now()));
        active.update(&txn).await?;

        if let Some(locs) = &input.localizations {
            CatalogLocalization::delete_many()
                .filter(catalog_localization::Column::CatalogId.eq(id))
                .exec(&txn)
                .await?;
            for loc in locs {
                catalog_localization::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    catalog_id: Set(id),
                    language_code: Set(loc.language_code.clone()),
                    name: Set(loc.name.clone()),
                    description: Set(loc.description.clone()),
                }
                .insert(&txn)
                .await?;
            }
        }

        if let Some(color_ids) = &input.color_ids {
            CatalogColor::delete_many()
                .filter(catalog_color::Column::CatalogId.eq(id))
                .exec(&txn)
                .await?;
            for color_id in color_ids {
                catalog_color::ActiveModel {
                    catalog_id: Set(id),
                    color_id: Set(*color_id),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;
        info!("Updated catalog: {}", id);

        self.get(id, None).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = Catalog::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Catalog {} not found", id)))?;
        existing.delete(&*self.db).await?;
        info!("Deleted catalog: {}", id);
        Ok(())
    }

    async fn validate_references(
        &self,
        locs: &[LocalizedText],
        color_ids: &[Uuid],
        brand_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        self.ensure_languages_exist(locs).await?;
        self.ensure_colors_exist(color_ids).await?;
        if let Some(brand_id) = brand_id {
            self.ensure_brand_exists(brand_id).await?;
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

    async fn ensure_brand_exists(&self, brand_id: Uuid) -> Result<(), ServiceError> {
        if Brand::find_by_id(brand_id).one(&*self.db).await?.is_none() {
            return Err(ServiceError::InvalidInput(format!(
                "Unknown brand id: {}",
                brand_id
            )));
        }
        Ok(())
    }
}

fn to_localized_text(model: catalog_localization::Model) -> LocalizedText {
    LocalizedText {
        language_code: model.language_code,
        name: model.name,
        description: model.description,
    }
}
