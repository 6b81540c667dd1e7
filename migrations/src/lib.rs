pub use sea_orm_migration::prelude::*;

mod m20240501_000001_create_languages_table;
mod m20240501_000002_create_colors_table;
mod m20240501_000003_create_brands_table;
mod m20240501_000004_create_categories_tables;
mod m20240501_000005_create_catalogs_tables;
mod m20240501_000006_create_collections_tables;
mod m20240501_000007_create_items_tables;
mod m20240501_000008_create_photos_table;
mod m20240501_000009_create_vacancies_tables;
mod m20240501_000010_create_reviews_table;
mod m20240501_000011_create_users_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240501_000001_create_languages_table::Migration),
            Box::new(m20240501_000002_create_colors_table::Migration),
            Box::new(m20240501_000003_create_brands_table::Migration),
            Box::new(m20240501_000004_create_categories_tables::Migration),
            Box::new(m20240501_000005_create_catalogs_tables::Migration),
            Box::new(m20240501_000006_create_collections_tables::Migration),
            Box::new(m20240501_000007_create_items_tables::Migration),
            Box::new(m20240501_000008_create_photos_table::Migration),
            Box::new(m20240501_000009_create_vacancies_tables::Migration),
            Box::new(m20240501_000010_create_reviews_table::Migration),
            Box::new(m20240501_000011_create_users_table::Migration),
        ]
    }
}
