use sea_orm_migration::prelude::*;

use crate::m20240501_000001_create_languages_table::Languages;
use crate::m20240501_000002_create_colors_table::Colors;
use crate::m20240501_000003_create_brands_table::Brands;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240501_000005_create_catalogs_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Catalogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Catalogs::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Catalogs::Price)
                            .decimal_len(16, 4)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Catalogs::Currency)
                            .string_len(3)
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(Catalogs::BrandId).uuid().null())
                    .col(
                        ColumnDef::new(Catalogs::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Catalogs::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Catalogs::UpdatedAt).timestamp().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalogs_brand")
                            .from(Catalogs::Table, Catalogs::BrandId)
                            .to(Brands::Table, Brands::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CatalogLocalizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogLocalizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CatalogLocalizations::CatalogId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogLocalizations::LanguageCode)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogLocalizations::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CatalogLocalizations::Description)
                            .text()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_localizations_catalog")
                            .from(
                                CatalogLocalizations::Table,
                                CatalogLocalizations::CatalogId,
                            )
                            .to(Catalogs::Table, Catalogs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_localizations_language")
                            .from(
                                CatalogLocalizations::Table,
                                CatalogLocalizations::LanguageCode,
                            )
                            .to(Languages::Table, Languages::Code),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_localizations_catalog_lang")
                    .table(CatalogLocalizations::Table)
                    .col(CatalogLocalizations::CatalogId)
                    .col(CatalogLocalizations::LanguageCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CatalogColors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CatalogColors::CatalogId).uuid().not_null())
                    .col(ColumnDef::new(CatalogColors::ColorId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(CatalogColors::CatalogId)
                            .col(CatalogColors::ColorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_colors_catalog")
                            .from(CatalogColors::Table, CatalogColors::CatalogId)
                            .to(Catalogs::Table, Catalogs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_catalog_colors_color")
                            .from(CatalogColors::Table, CatalogColors::ColorId)
                            .to(Colors::Table, Colors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalogs_is_active")
                    .table(Catalogs::Table)
                    .col(Catalogs::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatalogColors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CatalogLocalizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Catalogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Catalogs {
    Table,
    Id,
    Price,
    Currency,
    BrandId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum CatalogLocalizations {
    Table,
    Id,
    CatalogId,
    LanguageCode,
    Name,
    Description,
}

#[derive(DeriveIden)]
pub enum CatalogColors {
    Table,
    CatalogId,
    ColorId,
}
