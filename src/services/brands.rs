use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::{brand, Brand, BrandModel};
use crate::errors::ServiceError;

#[derive(Clone)]
pub struct BrandService {
    db: Arc<DatabaseConnection>,
}

impl BrandService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        name: String,
        logo_url: Option<String>,
    ) -> Result<BrandModel, ServiceError> {
        self.ensure_unique_name(&name, None).await?;

        let model = brand::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            logo_url: Set(logo_url),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        let created = model.insert(&*self.db).await?;
        info!("Created brand: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<BrandModel, ServiceError> {
        Brand::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Brand {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<BrandModel>, ServiceError> {
        Ok(Brand::find()
            .order_by_asc(brand::Column::Name)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        logo_url: Option<Option<String>>,
    ) -> Result<BrandModel, ServiceError> {
        if let Some(ref name) = name {
            self.ensure_unique_name(name, Some(id)).await?;
        }

        let existing = self.get(id).await?;
        let mut active: brand::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(logo_url) = logo_url {
            active.logo_url = Set(logo_url);
        }
        active.updated_at = Set(Some(Utc::now()));

        Ok(active.update(&*self.db).await?)
    }

    /// Deletes a brand. Catalogs referencing it keep existing with their
    /// brand cleared (FK is ON DELETE SET NULL).
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        existing.delete(&*self.db).await?;
        info!("Deleted brand: {}", id);
        Ok(())
    }

    async fn ensure_unique_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Brand::find().filter(brand::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(brand::Column::Id.ne(id));
        }
        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::AlreadyExists(format!(
                "Brand {} already exists",
                name
            )));
        }
        Ok(())
    }
}
