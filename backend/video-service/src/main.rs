use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use video_service::config::Config;
use video_service::handlers;
use video_service::media::S3MediaStorage;
use video_service::middleware::{AuthMiddleware, JwtValidator};
use video_service::repository::PgStore;
use video_service::AppState;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info,sqlx=warn"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors(allowed_origins: &str) -> Cors {
    let mut cors = Cors::default();
    for origin in allowed_origins.split(',') {
        let origin = origin.trim();
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else if !origin.is_empty() {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = ?e, "video-service terminated");
        return Err(io::Error::new(io::ErrorKind::Other, e.to_string()));
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!("Starting video-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let store = PgStore::connect(&config.database)
        .await
        .context("Failed to create database pool")?;
    store.migrate().await.context("Failed to run migrations")?;
    tracing::info!(
        max_connections = config.database.max_connections,
        "database ready"
    );

    let media = S3MediaStorage::from_config(config.media.clone()).await;
    let validator = Arc::new(JwtValidator::from_config(&config.auth)?);
    let state = web::Data::new(AppState::new(
        Arc::new(store.clone()),
        Arc::new(media),
        &config,
    ));

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("HTTP server listening on {}", bind_addr);

    let allowed_origins = config.cors.allowed_origins.clone();
    // `run()` stops on SIGINT/SIGTERM and drains in-flight requests.
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(AuthMiddleware::new(validator.clone()))
            .wrap(cors(&allowed_origins))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure_routes)
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await
    .context("HTTP server error")?;

    store.close().await;
    tracing::info!("video-service shut down");
    Ok(())
}
