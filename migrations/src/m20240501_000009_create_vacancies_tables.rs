use sea_orm_migration::prelude::*;

use crate::m20240501_000001_create_languages_table::Languages;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240501_000009_create_vacancies_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vacancies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vacancies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Vacancies::IsOpen)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Vacancies::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Vacancies::UpdatedAt).timestamp().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VacancyLocalizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VacancyLocalizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VacancyLocalizations::VacancyId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VacancyLocalizations::LanguageCode)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VacancyLocalizations::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VacancyLocalizations::Description)
                            .text()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vacancy_localizations_vacancy")
                            .from(
                                VacancyLocalizations::Table,
                                VacancyLocalizations::VacancyId,
                            )
                            .to(Vacancies::Table, Vacancies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vacancy_localizations_language")
                            .from(
                                VacancyLocalizations::Table,
                                VacancyLocalizations::LanguageCode,
                            )
                            .to(Languages::Table, Languages::Code),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vacancy_localizations_vacancy_lang")
                    .table(VacancyLocalizations::Table)
                    .col(VacancyLocalizations::VacancyId)
                    .col(VacancyLocalizations::LanguageCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VacancyLocalizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vacancies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Vacancies {
    Table,
    Id,
    IsOpen,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum VacancyLocalizations {
    Table,
    Id,
    VacancyId,
    LanguageCode,
    Title,
    Description,
}
