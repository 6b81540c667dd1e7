use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::entities::{color, Color, ColorModel};
use crate::errors::ServiceError;

#[derive(Clone)]
pub struct ColorService {
    db: Arc<DatabaseConnection>,
}

impl ColorService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: String, hex: String) -> Result<ColorModel, ServiceError> {
        self.ensure_unique_name(&name, None).await?;

        let model = color::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            hex: Set(hex),
        };

        let created = model.insert(&*self.db).await?;
        info!("Created color: {}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<ColorModel, ServiceError> {
        Color::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Color {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ColorModel>, ServiceError> {
        Ok(Color::find()
            .order_by_asc(color::Column::Name)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        hex: Option<String>,
    ) -> Result<ColorModel, ServiceError> {
        if let Some(ref name) = name {
            self.ensure_unique_name(name, Some(id)).await?;
        }

        let existing = self.get(id).await?;
        let mut active: color::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(hex) = hex {
            active.hex = Set(hex);
        }

        Ok(active.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        existing.delete(&*self.db).await?;
        info!("Deleted color: {}", id);
        Ok(())
    }

    async fn ensure_unique_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Color::find().filter(color::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(color::Column::Id.ne(id));
        }
        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::AlreadyExists(format!(
                "Color {} already exists",
                name
            )));
        }
        Ok(())
    }
}
