use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;

/// Database connection settings.
#[derive(Clone, Debug)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
    pub sqlx_logging: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            acquire_timeout: Duration::from_secs(8),
            sqlx_logging: false,
        }
    }
}

impl From<&AppConfig> for DbConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            url: cfg.database_url.clone(),
            max_connections: cfg.db_max_connections,
            min_connections: cfg.db_min_connections,
            connect_timeout: Duration::from_secs(cfg.db_connect_timeout_secs),
            idle_timeout: Duration::from_secs(cfg.db_idle_timeout_secs),
            acquire_timeout: Duration::from_secs(cfg.db_acquire_timeout_secs),
            sqlx_logging: cfg.is_development(),
        }
    }
}

/// Establishes a database connection with default pool settings.
pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let config = DbConfig {
        url: database_url.to_string(),
        ..Default::default()
    };
    establish_connection_with_config(config).await
}

/// Establishes a database connection with explicit pool settings.
pub async fn establish_connection_with_config(
    config: DbConfig,
) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(config.url.clone());
    opts.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .acquire_timeout(config.acquire_timeout)
        .sqlx_logging(config.sqlx_logging);

    let conn = Database::connect(opts).await?;
    info!("Database connection established");
    Ok(conn)
}

/// Establishes a connection using pool settings from the application config.
pub async fn establish_connection_from_app_config(
    cfg: &AppConfig,
) -> Result<DatabaseConnection, DbErr> {
    establish_connection_with_config(DbConfig::from(cfg)).await
}

/// Runs all pending migrations.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<(), DbErr> {
    info!("Running database migrations");
    migrations::Migrator::up(conn, None).await?;
    info!("Database migrations completed");
    Ok(())
}

/// Verifies the database connection is alive.
pub async fn ping(conn: &DatabaseConnection) -> Result<(), DbErr> {
    conn.ping().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connects_and_migrates_in_memory() {
        let conn = establish_connection("sqlite::memory:")
            .await
            .expect("in-memory sqlite should connect");
        run_migrations(&conn).await.expect("migrations should run");
        ping(&conn).await.expect("ping should succeed");
    }

    #[test]
    fn db_config_derives_from_app_config() {
        let cfg = AppConfig::new(
            "sqlite::memory:".into(),
            "test_secret_key_for_testing_purposes_only_32chars".into(),
            3600,
            "127.0.0.1".into(),
            8080,
            "development".into(),
        );
        let db_cfg = DbConfig::from(&cfg);
        assert_eq!(db_cfg.url, "sqlite::memory:");
        assert!(db_cfg.sqlx_logging);
    }
}
