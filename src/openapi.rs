use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::entities::{
    BrandModel, ColorModel, LanguageModel, PhotoModel, ReviewModel, UserModel,
};
use crate::errors::ErrorResponse;
use crate::handlers;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = r#"
REST backend for a multilingual product catalog: catalogs, categories,
collections, items, brands, colors, vacancies, reviews and image uploads.

## Authentication

Read endpoints are public. Mutations require a JWT access token:

```
Authorization: Bearer <your-jwt-token>
```

Obtain a token via `POST /api/v1/auth/login`.

## Localization

Localized entities carry one text row per language. Pass `?lang=<code>` on
reads to narrow the returned localizations to one language.
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    paths(
        handlers::catalogs::create_catalog,
        handlers::catalogs::list_catalogs,
        handlers::catalogs::get_catalog,
        handlers::catalogs::update_catalog,
        handlers::catalogs::delete_catalog,
        handlers::categories::create_category,
        handlers::categories::list_categories,
        handlers::categories::get_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,
        handlers::collections::create_collection,
        handlers::collections::list_collections,
        handlers::collections::get_collection,
        handlers::collections::update_collection,
        handlers::collections::set_collection_colors,
        handlers::collections::delete_collection,
        handlers::items::create_item,
        handlers::items::list_items,
        handlers::items::get_item,
        handlers::items::update_item,
        handlers::items::delete_item,
        handlers::brands::create_brand,
        handlers::brands::list_brands,
        handlers::brands::get_brand,
        handlers::brands::update_brand,
        handlers::brands::delete_brand,
        handlers::colors::create_color,
        handlers::colors::list_colors,
        handlers::colors::get_color,
        handlers::colors::update_color,
        handlers::colors::delete_color,
        handlers::languages::create_language,
        handlers::languages::list_languages,
        handlers::languages::get_language,
        handlers::languages::delete_language,
        handlers::vacancies::create_vacancy,
        handlers::vacancies::list_vacancies,
        handlers::vacancies::get_vacancy,
        handlers::vacancies::update_vacancy,
        handlers::vacancies::delete_vacancy,
        handlers::reviews::create_review,
        handlers::reviews::list_reviews,
        handlers::reviews::get_review,
        handlers::reviews::delete_review,
        handlers::uploads::upload_image,
        handlers::uploads::list_images,
        handlers::uploads::get_image,
        handlers::uploads::delete_image,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
    ),
    components(schemas(
        ErrorResponse,
        BrandModel,
        ColorModel,
        LanguageModel,
        PhotoModel,
        ReviewModel,
        UserModel,
        services::LocalizedText,
        services::catalogs::CatalogView,
        services::catalogs::CatalogPage,
        services::categories::CategoryView,
        services::collections::CollectionView,
        services::items::ItemView,
        services::items::ItemPage,
        services::reviews::ReviewPage,
        services::vacancies::VacancyText,
        services::vacancies::VacancyView,
        handlers::categories::LocalizationRequest,
        handlers::categories::CreateCategoryRequest,
        handlers::categories::UpdateCategoryRequest,
        handlers::catalogs::CreateCatalogRequest,
        handlers::catalogs::UpdateCatalogRequest,
        handlers::collections::CreateCollectionRequest,
        handlers::collections::UpdateCollectionRequest,
        handlers::collections::SetColorsRequest,
        handlers::items::CreateItemRequest,
        handlers::items::UpdateItemRequest,
        handlers::brands::CreateBrandRequest,
        handlers::brands::UpdateBrandRequest,
        handlers::colors::CreateColorRequest,
        handlers::colors::UpdateColorRequest,
        handlers::languages::CreateLanguageRequest,
        handlers::vacancies::VacancyTextRequest,
        handlers::vacancies::CreateVacancyRequest,
        handlers::vacancies::UpdateVacancyRequest,
        handlers::reviews::CreateReviewRequest,
        handlers::auth::RegisterRequest,
        handlers::auth::LoginRequest,
        handlers::auth::LoginResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Catalogs", description = "Aggregated catalog reads and transactional writes"),
        (name = "Categories", description = "Category management"),
        (name = "Collections", description = "Collection management"),
        (name = "Items", description = "Item management"),
        (name = "Brands", description = "Brand management"),
        (name = "Colors", description = "Color palette"),
        (name = "Languages", description = "Supported languages"),
        (name = "Vacancies", description = "Job vacancies"),
        (name = "Reviews", description = "Customer reviews"),
        (name = "Uploads", description = "Image uploads"),
        (name = "Auth", description = "Authentication")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
