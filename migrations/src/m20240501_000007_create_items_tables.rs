use sea_orm_migration::prelude::*;

use crate::m20240501_000001_create_languages_table::Languages;
use crate::m20240501_000004_create_categories_tables::Categories;
use crate::m20240501_000006_create_collections_tables::Collections;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240501_000007_create_items_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Items::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Items::CollectionId).uuid().null())
                    .col(ColumnDef::new(Items::Price).decimal_len(16, 4).null())
                    .col(
                        ColumnDef::new(Items::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Items::UpdatedAt).timestamp().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_category")
                            .from(Items::Table, Items::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_collection")
                            .from(Items::Table, Items::CollectionId)
                            .to(Collections::Table, Collections::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ItemLocalizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ItemLocalizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ItemLocalizations::ItemId).uuid().not_null())
                    .col(
                        ColumnDef::new(ItemLocalizations::LanguageCode)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ItemLocalizations::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ItemLocalizations::Description).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_localizations_item")
                            .from(ItemLocalizations::Table, ItemLocalizations::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_localizations_language")
                            .from(ItemLocalizations::Table, ItemLocalizations::LanguageCode)
                            .to(Languages::Table, Languages::Code),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_item_localizations_item_lang")
                    .table(ItemLocalizations::Table)
                    .col(ItemLocalizations::ItemId)
                    .col(ItemLocalizations::LanguageCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_category")
                    .table(Items::Table)
                    .col(Items::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItemLocalizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Items {
    Table,
    Id,
    CategoryId,
    CollectionId,
    Price,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ItemLocalizations {
    Table,
    Id,
    ItemId,
    LanguageCode,
    Name,
    Description,
}
