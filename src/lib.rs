//! Catalog API Library
//!
//! This crate provides the core functionality for the catalog API
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod openapi;
pub mod services;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::services::AppServices;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: AppConfig,
    pub auth: AuthService,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: AppConfig) -> Self {
        let auth = AuthService::new(&config.jwt_secret, config.jwt_expiration);
        let services = AppServices::new(db.clone(), &config, auth.clone());
        Self {
            db,
            config,
            auth,
            services,
        }
    }
}

/// All `/api/v1` routes.
pub fn api_v1_routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .nest("/catalogs", handlers::catalogs::catalogs_routes())
        .nest("/categories", handlers::categories::categories_routes())
        .nest("/collections", handlers::collections::collections_routes())
        .nest("/items", handlers::items::items_routes())
        .nest("/brands", handlers::brands::brands_routes())
        .nest("/colors", handlers::colors::colors_routes())
        .nest("/languages", handlers::languages::languages_routes())
        .nest("/vacancies", handlers::vacancies::vacancies_routes())
        .nest("/reviews", handlers::reviews::reviews_routes())
        .nest(
            "/uploads",
            handlers::uploads::uploads_routes(config.max_upload_bytes),
        )
        .nest("/auth", handlers::auth::auth_routes())
}

/// Builds the full application router: API, health probes, Swagger UI and
/// static serving of uploaded files.
pub fn create_app(state: AppState) -> Router {
    let upload_dir = state.config.upload_dir.clone();

    Router::new()
        .nest("/api/v1", api_v1_routes(&state.config))
        .nest("/health", handlers::health::health_routes())
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .with_state(state)
}
