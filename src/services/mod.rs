pub mod brands;
pub mod catalogs;
pub mod categories;
pub mod collections;
pub mod colors;
pub mod items;
pub mod languages;
pub mod photos;
pub mod reviews;
pub mod users;
pub mod vacancies;

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::AuthService;
use crate::config::AppConfig;

/// Localized name/description pair for one language.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LocalizedText {
    pub language_code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Service registry shared through the application state.
#[derive(Clone)]
pub struct AppServices {
    pub languages: languages::LanguageService,
    pub colors: colors::ColorService,
    pub brands: brands::BrandService,
    pub categories: categories::CategoryService,
    pub catalogs: catalogs::CatalogService,
    pub collections: collections::CollectionService,
    pub items: items::ItemService,
    pub vacancies: vacancies::VacancyService,
    pub reviews: reviews::ReviewService,
    pub photos: photos::PhotoService,
    pub users: users::UserService,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>, config: &AppConfig, auth: AuthService) -> Self {
        Self {
            languages: languages::LanguageService::new(db.clone()),
            colors: colors::ColorService::new(db.clone()),
            brands: brands::BrandService::new(db.clone()),
            categories: categories::CategoryService::new(db.clone()),
            catalogs: catalogs::CatalogService::new(db.clone()),
            collections: collections::CollectionService::new(db.clone()),
            items: items::ItemService::new(db.clone()),
            vacancies: vacancies::VacancyService::new(db.clone()),
            reviews: reviews::ReviewService::new(db.clone()),
            photos: photos::PhotoService::new(db.clone(), config.upload_dir.clone()),
            users: users::UserService::new(db, auth),
        }
    }
}
