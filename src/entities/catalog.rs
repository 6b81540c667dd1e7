use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog entity: a purchasable product definition. Names and descriptions
/// live in `catalog_localizations`, one row per language.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "catalogs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub price: Decimal,
    pub currency: String,
    pub brand_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id"
    )]
    Brand,
    #[sea_orm(has_many = "super::catalog_localization::Entity")]
    Localizations,
    #[sea_orm(has_many = "super::catalog_color::Entity")]
    CatalogColors,
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::catalog_localization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Localizations.def()
    }
}

impl Related<super::color::Entity> for Entity {
    fn to() -> RelationDef {
        super::catalog_color::Relation::Color.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::catalog_color::Relation::Catalog.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
