use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::entities::{
    catalog_localization, category_localization, item_localization, language,
    vacancy_localization, Language, LanguageModel,
};
use crate::errors::ServiceError;

/// Manages the set of languages localizations may reference.
#[derive(Clone)]
pub struct LanguageService {
    db: Arc<DatabaseConnection>,
}

impl LanguageService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, code: String, name: String) -> Result<LanguageModel, ServiceError> {
        if Language::find_by_id(&code).one(&*self.db).await?.is_some() {
            return Err(ServiceError::AlreadyExists(format!(
                "Language {} already exists",
                code
            )));
        }

        let model = language::ActiveModel {
            code: Set(code.clone()),
            name: Set(name),
            created_at: Set(Utc::now()),
        };

        let created = model.insert(&*self.db).await?;
        info!("Created language: {}", code);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, code: &str) -> Result<LanguageModel, ServiceError> {
        Language::find_by_id(code)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Language {} not found", code)))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<LanguageModel>, ServiceError> {
        Ok(Language::find()
            .order_by_asc(language::Column::Code)
            .all(&*self.db)
            .await?)
    }

    /// Deletes a language. Fails with a conflict while any localization row
    /// still references the code.
    #[instrument(skip(self))]
    pub async fn delete(&self, code: &str) -> Result<(), ServiceError> {
        let lang = self.get(code).await?;

        let references = self.count_references(code).await?;
        if references > 0 {
            return Err(ServiceError::Conflict(format!(
                "Language {} is referenced by {} localization(s)",
                code, references
            )));
        }

        lang.delete(&*self.db).await?;
        info!("Deleted language: {}", code);
        Ok(())
    }

    async fn count_references(&self, code: &str) -> Result<u64, ServiceError> {
        let catalogs = catalog_localization::Entity::find()
            .filter(catalog_localization::Column::LanguageCode.eq(code))
            .count(&*self.db)
            .await?;
        let categories = category_localization::Entity::find()
            .filter(category_localization::Column::LanguageCode.eq(code))
            .count(&*self.db)
            .await?;
        let items = item_localization::Entity::find()
            .filter(item_localization::Column::LanguageCode.eq(code))
            .count(&*self.db)
            .await?;
        let vacancies = vacancy_localization::Entity::find()
            .filter(vacancy_localization::Column::LanguageCode.eq(code))
            .count(&*self.db)
            .await?;
        Ok(catalogs + categories + items + vacancies)
    }

}
