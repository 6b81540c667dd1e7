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
    category, category_localization, Category, CategoryLocalization, CategoryModel, Language,
};
use crate::errors::ServiceError;

use super::LocalizedText;

/// Category together with its per-language texts.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: CategoryModel,
    pub localizations: Vec<LocalizedText>,
}

#[derive(Clone, Debug)]
pub struct CategoryInput {
    pub name: String,
    pub position: i32,
    pub localizations: Vec<LocalizedText>,
}

#[derive(Clone)]
pub struct CategoryService {
    db: Arc<DatabaseConnection>,
}

impl CategoryService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Inserts the category and its localizations in one transaction.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CategoryInput) -> Result<CategoryView, ServiceError> {
        self.ensure_unique_name(&input.name, None).await?;
        self.ensure_languages_exist(&input.localizations).await?;

        let category_id = Uuid::new_v4();
        let txn = self.db.begin().await?;

        let model = category::ActiveModel {
            id: Set(category_id),
            name: Set(input.name.clone()),
            position: Set(input.position),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };
        let created = model.insert(&txn).await?;

        for loc in &input.localizations {
            category_localization::ActiveModel {
                id: Set(Uuid::new_v4()),
                category_id: Set(category_id),
                language_code: Set(loc.language_code.clone()),
                name: Set(loc.name.clone()),
                description: Set(loc.description.clone()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Created category: {}", category_id);

        Ok(CategoryView {
            category: created,
            localizations: input.localizations,
        })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid, lang: Option<&str>) -> Result<CategoryView, ServiceError> {
        let category = Category::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))?;

        let mut query = category.find_related(CategoryLocalization);
        if let Some(lang) = lang {
            query = query.filter(category_localization::Column::LanguageCode.eq(lang));
        }
        let localizations = query.all(&*self.db).await?;

        Ok(CategoryView {
            category,
            localizations: localizations.into_iter().map(to_localized_text).collect(),
        })
    }

    #[instrument(skip(self))]
    pub async fn list(&self, lang: Option<&str>) -> Result<Vec<CategoryView>, ServiceError> {
        let categories = Category::find()
            .order_by_asc(category::Column::Position)
            .all(&*self.db)
            .await?;

        let localizations = categories
            .load_many(CategoryLocalization, &*self.db)
            .await?;

        Ok(categories
            .into_iter()
            .zip(localizations)
            .map(|(category, locs)| CategoryView {
                category,
                localizations: locs
                    .into_iter()
                    .filter(|l| lang.map_or(true, |code| l.language_code == code))
                    .map(to_localized_text)
                    .collect(),
            })
            .collect())
    }

    /// Replaces the category fields and, when localizations are supplied,
    /// swaps the whole localization set in the same transaction.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: Uuid,
        input: CategoryUpdate,
    ) -> Result<CategoryView, ServiceError> {
        if let Some(ref name) = input.name {
            self.ensure_unique_name(name, Some(id)).await?;
        }
        if let Some(ref locs) = input.localizations {
            self.ensure_languages_exist(locs).await?;
        }

        let existing = Category::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))?;

        let txn = self.db.begin().await?;

        let mut active: category::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(position) = input.position {
            active.position = Set(position);
        }
        active.updated_at = Set(Some(Utc::now()));
        let updated = active.update(&txn).await?;

        if let Some(locs) = &input.localizations {
            CategoryLocalization::delete_many()
                .filter(category_localization::Column::CategoryId.eq(id))
                .exec(&txn)
                .await?;
            for loc in locs {
                category_localization::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    category_id: Set(id),
                    language_code: Set(loc.language_code.clone()),
                    name: Set(loc.name.clone()),
                    description: Set(loc.description.clone()),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;
        self.get(updated.id, None).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = Category::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))?;
        existing.delete(&*self.db).await?;
        info!("Deleted category: {}", id);
        Ok(())
    }

    async fn ensure_unique_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Category::find().filter(category::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(category::Column::Id.ne(id));
        }
        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::AlreadyExists(format!(
                "Category {} already exists",
                name
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

#[derive(Clone, Debug, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub position: Option<i32>,
    pub localizations: Option<Vec<LocalizedText>>,
}

fn to_localized_text(model: category_localization::Model) -> LocalizedText {
    LocalizedText {
        language_code: model.language_code,
        name: model.name,
        description: model.description,
    }
}
