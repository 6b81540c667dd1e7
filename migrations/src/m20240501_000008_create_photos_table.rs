use sea_orm_migration::prelude::*;

use crate::m20240501_000006_create_collections_tables::Collections;
use crate::m20240501_000007_create_items_tables::Items;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240501_000008_create_photos_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Photos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Photos::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Photos::Url).string_len(1024).not_null())
                    .col(ColumnDef::new(Photos::FileName).string_len(255).not_null())
                    .col(ColumnDef::new(Photos::ContentType).string_len(64).null())
                    .col(ColumnDef::new(Photos::SizeBytes).big_integer().null())
                    .col(ColumnDef::new(Photos::CollectionId).uuid().null())
                    .col(ColumnDef::new(Photos::ItemId).uuid().null())
                    .col(
                        ColumnDef::new(Photos::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Photos::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photos_collection")
                            .from(Photos::Table, Photos::CollectionId)
                            .to(Collections::Table, Collections::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_photos_item")
                            .from(Photos::Table, Photos::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Photos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Photos {
    Table,
    Id,
    Url,
    FileName,
    ContentType,
    SizeBytes,
    CollectionId,
    ItemId,
    SortOrder,
    CreatedAt,
}
