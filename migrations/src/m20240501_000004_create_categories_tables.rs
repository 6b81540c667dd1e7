use sea_orm_migration::prelude::*;

use crate::m20240501_000001_create_languages_table::Languages;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240501_000004_create_categories_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Categories::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Categories::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Categories::UpdatedAt).timestamp().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CategoryLocalizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CategoryLocalizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CategoryLocalizations::CategoryId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CategoryLocalizations::LanguageCode)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CategoryLocalizations::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CategoryLocalizations::Description)
                            .text()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_localizations_category")
                            .from(
                                CategoryLocalizations::Table,
                                CategoryLocalizations::CategoryId,
                            )
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_localizations_language")
                            .from(
                                CategoryLocalizations::Table,
                                CategoryLocalizations::LanguageCode,
                            )
                            .to(Languages::Table, Languages::Code),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_category_localizations_category_lang")
                    .table(CategoryLocalizations::Table)
                    .col(CategoryLocalizations::CategoryId)
                    .col(CategoryLocalizations::LanguageCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CategoryLocalizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Categories {
    Table,
    Id,
    Name,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum CategoryLocalizations {
    Table,
    Id,
    CategoryId,
    LanguageCode,
    Name,
    Description,
}
