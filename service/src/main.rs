// service/src/main.rs

use shopcart::{MemoryStore, ShopcartStore};
use shopcart_service::config::{AppConfig, LogFormat, StorageBackend};
use shopcart_service::db::{self, PgShopcartStore};
use shopcart_service::state::AppState;
use shopcart_service::web::configure_app_routes;

use actix_web::{web as actix_data, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

fn init_tracing(format: LogFormat) {
  let builder = tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Text => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}

async fn build_store(config: &AppConfig) -> std::io::Result<Arc<dyn ShopcartStore>> {
  match config.storage_backend {
    StorageBackend::Memory => {
      tracing::warn!("Using the in-memory store; data is lost on shutdown.");
      Ok(Arc::new(MemoryStore::new()))
    }
    StorageBackend::Postgres => {
      let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
          tracing::error!(error = %e, "Failed to connect to the database.");
          std::io::Error::other(format!("Database connection error: {}", e))
        })?;
      tracing::info!("Successfully connected to the database.");

      if config.init_schema {
        db::init_schema(&pool).await.map_err(|e| {
          tracing::error!(error = %e, "Failed to initialize the database schema.");
          std::io::Error::other(format!("Database schema error: {}", e))
        })?;
      }
      Ok(Arc::new(PgShopcartStore::new(pool)))
    }
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Configuration decides the log format, so it is loaded before tracing starts.
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      eprintln!("Configuration error: {}", e);
      return Err(std::io::Error::other(e.to_string()));
    }
  };
  init_tracing(app_config.log_format);

  tracing::info!("Starting shopcart service...");

  let store = build_store(&app_config).await?;
  let app_state = AppState::new(store, app_config.clone());

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
