use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Language entity, keyed by its ISO code (e.g. "en", "de").
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "languages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::catalog_localization::Entity")]
    CatalogLocalizations,
    #[sea_orm(has_many = "super::category_localization::Entity")]
    CategoryLocalizations,
    #[sea_orm(has_many = "super::item_localization::Entity")]
    ItemLocalizations,
    #[sea_orm(has_many = "super::vacancy_localization::Entity")]
    VacancyLocalizations,
}

impl Related<super::catalog_localization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogLocalizations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
