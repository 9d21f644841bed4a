//! Connection pool and schema bootstrap.
//!
//! The schema lives in `migrations/` and is embedded into the binary with
//! `sqlx::migrate!`, so a fresh database is brought up to date at startup.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// Opens the shared connection pool. Acquiring a connection gives up after
/// `db_connect_timeout_secs`; there are no other request-level timeouts.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    log::info!(
        "database connection pool established (max {} connections)",
        config.db_max_connections
    );
    Ok(pool)
}

/// Applies all pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    log::info!("running database migrations");
    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            log::info!("database schema is up to date");
            Ok(())
        }
        Err(e) => {
            log::error!("migration failed: {}", e);
            Err(e)
        }
    }
}
