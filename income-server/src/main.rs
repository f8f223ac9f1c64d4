#[macro_use]
extern crate tracing;

use std::error::Error;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{App, HttpServer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

use income_lib::config::Config;

const SERVICE_NAME: &str = "income-server";

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default());
    let tracing_guard = tracing::subscriber::set_default(subscriber);
    info!("tracing initialized");

    let config = match get_config_file() {
        Some(config_path) => {
            info!(?config_path, "Loading config file");
            Config::from_file(config_path)?
        }
        None => {
            warn!("Config file not found, reading config from environment");
            Config::from_env()?
        }
    };

    let telemetry_layer = config
        .telemetry
        .as_ref()
        .map(|telemetry| income_lib::tracing::create_opentelemetry_layer(SERVICE_NAME, telemetry))
        .transpose()?;

    let subscriber = registry::Registry::default()
        .with(config.level_filter()?)
        .with(tracing_subscriber::fmt::Layer::default())
        .with(telemetry_layer);
    tracing::subscriber::set_global_default(subscriber).expect("set up subscriber");
    drop(tracing_guard);

    let (category_repo, income_repo, health_check) =
        income_repo::sqlx_repo::create_repos(config.database_url.clone(), config.max_pool_size)
            .await?;

    let cors_allowed_origins = config.cors_allowed_origins.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(create_cors(&cors_allowed_origins))
            .wrap(income_lib::tracing::create_middleware())
            .configure(income_lib::app_config_func(
                category_repo.clone(),
                income_repo.clone(),
                health_check.clone(),
            ))
    });

    info!(bind_address = %config.bind_address, "Starting server");
    server.bind(&config.bind_address)?.run().await?;

    Ok(())
}

fn create_cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
}

fn get_config_file() -> Option<PathBuf> {
    let config_current_dir = PathBuf::from("config.toml");
    if config_current_dir.exists() {
        return Some(config_current_dir);
    }
    if let Ok(config_env) = std::env::var("CONFIGURATION_DIRECTORY") {
        let config_path = PathBuf::from(config_env).join("config.toml");
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}
