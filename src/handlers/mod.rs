pub mod auth;
pub mod brands;
pub mod catalogs;
pub mod categories;
pub mod collections;
pub mod colors;
pub mod common;
pub mod health;
pub mod items;
pub mod languages;
pub mod reviews;
pub mod uploads;
pub mod vacancies;
