use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use config::Config;
use diesel_migrations::MigrationHarness;
use dotenvy::dotenv;

use pushkind_catalog::MIGRATIONS;
use pushkind_catalog::db::establish_connection_pool_with_size;
use pushkind_catalog::errors::ErrorResponder;
use pushkind_catalog::messages::MessageCatalog;
use pushkind_catalog::models::config::ServerConfig;
use pushkind_catalog::repository::DieselRepository;
use pushkind_catalog::routes;

fn startup_error(context: &str, error: impl std::fmt::Display) -> std::io::Error {
    log::error!("{context}: {error}");
    std::io::Error::other(format!("{context}: {error}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let server_config: ServerConfig = settings
        .and_then(|s| s.try_deserialize())
        .map_err(|e| startup_error("Failed to load configuration", e))?;

    let pool =
        establish_connection_pool_with_size(&server_config.database_url, server_config.pool_size)
            .map_err(|e| startup_error("Failed to establish database connection", e))?;

    pool.get()
        .map_err(|e| startup_error("Failed to get a connection for migrations", e))?
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| startup_error("Failed to run database migrations", e))?;

    let repo = web::Data::new(DieselRepository::new(pool));
    let responder = web::Data::new(ErrorResponder::new(Arc::new(
        MessageCatalog::with_overrides(server_config.messages.clone()),
    )));

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting catalog service on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .app_data(responder.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
