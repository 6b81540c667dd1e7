use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240501_000002_create_colors_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Colors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Colors::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Colors::Name)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Colors::Hex).string_len(7).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Colors::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Colors {
    Table,
    Id,
    Name,
    Hex,
}
