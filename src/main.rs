use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use todo_api::{db, routes, store::PgStore, AppState, Config};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().context("loading configuration")?;

    let pool = db::connect(&config)
        .await
        .context("connecting to the database")?;
    db::run_migrations(&pool)
        .await
        .context("running migrations")?;

    let state = AppState::from_config(&config, Arc::new(PgStore::new(pool)));

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("creating upload directory {}", config.upload_dir.display()))?;
    let upload_dir = config.upload_dir.clone();

    log::info!("Starting todo API server at {}", config.server_url());
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(|cfg| state.configure(cfg))
            .configure(routes::config)
            .service(routes::uploads(&upload_dir))
    })
    .bind((config.server_host.as_str(), config.server_port))
    .with_context(|| format!("binding {}", config.server_url()))?
    .run()
    .await?;

    Ok(())
}
