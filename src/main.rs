use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use catalog_api::config::{init_tracing, load_config, AppConfig};
use catalog_api::{create_app, db, handlers, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    init_tracing(config.log_level(), config.log_json);
    handlers::health::init_start_time();

    info!(
        environment = %config.environment,
        "Starting catalog API v{}",
        env!("CARGO_PKG_VERSION")
    );

    let conn = db::establish_connection_from_app_config(&config).await?;
    if config.auto_migrate {
        db::run_migrations(&conn).await?;
    }

    let state = AppState::new(Arc::new(conn), config.clone());

    state
        .services
        .users
        .bootstrap_admin(
            config.bootstrap_admin_email.as_deref(),
            config.bootstrap_admin_password.as_deref(),
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bootstrap admin account: {}", e))?;

    let app = create_app(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(build_cors(&config));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// CORS policy: explicit origins from config, or permissive in development.
fn build_cors(config: &AppConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

    if let Some(origins) = config.cors_allowed_origins.as_deref() {
        let parsed: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|o| {
                let o = o.trim();
                match o.parse::<HeaderValue>() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", o);
                        None
                    }
                }
            })
            .collect();
        if !parsed.is_empty() {
            return CorsLayer::new()
                .allow_origin(parsed)
                .allow_methods(methods)
                .allow_headers(headers);
        }
    }

    if config.should_allow_permissive_cors() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers)
    } else {
        error!("No CORS origins configured; cross-origin requests will be refused");
        CorsLayer::new()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
