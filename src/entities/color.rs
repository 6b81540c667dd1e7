use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "colors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub hex: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::catalog_color::Entity")]
    CatalogColors,
    #[sea_orm(has_many = "super::collection_color::Entity")]
    CollectionColors,
}

impl Related<super::catalog::Entity> for Entity {
    fn to() -> RelationDef {
        super::catalog_color::Relation::Catalog.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::catalog_color::Relation::Color.def().rev())
    }
}

impl Related<super::collection::Entity> for Entity {
    fn to() -> RelationDef {
        super::collection_color::Relation::Collection.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::collection_color::Relation::Color.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
