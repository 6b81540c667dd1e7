//! SeaORM entity definitions for the catalog schema.

pub mod brand;
pub mod catalog;
pub mod catalog_color;
pub mod catalog_localization;
pub mod category;
pub mod category_localization;
pub mod collection;
pub mod collection_color;
pub mod color;
pub mod item;
pub mod item_localization;
pub mod language;
pub mod photo;
pub mod review;
pub mod user;
pub mod vacancy;
pub mod vacancy_localization;

// Re-export entities
pub use brand::{Entity as Brand, Model as BrandModel};
pub use catalog::{Entity as Catalog, Model as CatalogModel};
pub use catalog_color::Entity as CatalogColor;
pub use catalog_localization::{Entity as CatalogLocalization, Model as CatalogLocalizationModel};
pub use category::{Entity as Category, Model as CategoryModel};
pub use category_localization::{
    Entity as CategoryLocalization, Model as CategoryLocalizationModel,
};
pub use collection::{Entity as Collection, Model as CollectionModel};
pub use collection_color::Entity as CollectionColor;
pub use color::{Entity as Color, Model as ColorModel};
pub use item::{Entity as Item, Model as ItemModel};
pub use item_localization::{Entity as ItemLocalization, Model as ItemLocalizationModel};
pub use language::{Entity as Language, Model as LanguageModel};
pub use photo::{Entity as Photo, Model as PhotoModel};
pub use review::{Entity as Review, Model as ReviewModel};
pub use user::{Entity as User, Model as UserModel};
pub use vacancy::{Entity as Vacancy, Model as VacancyModel};
pub use vacancy_localization::{Entity as VacancyLocalization, Model as VacancyLocalizationModel};
