use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicer::{
  adapters::http::{InvoiceUseCases, RequestIdMiddleware, configure_invoice_routes},
  domain::invoice::InvoiceRepository,
  infrastructure::{
    config::{Config, DatabaseConfig, DatabaseDriver},
    persistence::{memory::InMemoryInvoiceRepository, postgres::PostgresInvoiceRepository},
  },
};

/// Builds the invoice store selected by `database.driver`
async fn build_repository(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn InvoiceRepository>> {
  match config.driver {
    DatabaseDriver::Memory => {
      tracing::warn!("Using the in-memory invoice store, data is lost on restart");
      Ok(Arc::new(InMemoryInvoiceRepository::new()))
    }
    DatabaseDriver::Postgres => {
      tracing::info!("Connecting to database");

      let db_pool = tokio::time::timeout(
        Duration::from_secs(config.connect_timeout_seconds),
        PgPoolOptions::new()
          .max_connections(config.max_connections)
          .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
          .connect(&config.url),
      )
      .await
      .map_err(|_| {
        tracing::error!(
          "Database connection timed out after {} seconds. Is PostgreSQL running?",
          config.connect_timeout_seconds
        );
        anyhow::anyhow!(
          "Database connection timed out after {} seconds",
          config.connect_timeout_seconds
        )
      })?
      .context("Could not connect to database. Is PostgreSQL running?")?;

      tracing::info!("Database connection pool created");

      tracing::info!("Running database migrations");
      sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
      tracing::info!("Database migrations completed");

      Ok(Arc::new(PostgresInvoiceRepository::new(db_pool)))
    }
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicer=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoice API");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  let invoice_repo = build_repository(&config.database).await?;
  let use_cases = InvoiceUseCases::from_repository(invoice_repo);

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let use_cases = use_cases.clone();
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .service(
        web::scope("/invoices").configure(|cfg| configure_invoice_routes(cfg, use_cases)),
      )
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
