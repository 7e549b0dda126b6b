use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicer::{
  adapters::http::{RequestIdMiddleware, TemplateEngine, configure_web_routes},
  infrastructure::{backend::BackendClient, config::Config},
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicer=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoice web frontend");

  let config = Config::load().context("Failed to load configuration")?;

  let templates =
    TemplateEngine::new(&config.web.template_glob).context("Failed to load templates")?;
  tracing::info!("Template engine initialized");

  let backend = BackendClient::new(config.web.backend.clone())
    .context("Failed to create backend client")?;
  tracing::info!("Invoice API expected at {}", backend.base_url());

  let static_dir = config.web.static_dir.clone();
  let host = config.web.host.clone();
  let port = config.web.port;

  tracing::info!("Starting HTTP server on {}:{}", host, port);

  HttpServer::new(move || {
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .configure(|cfg| configure_web_routes(cfg, templates.clone(), backend.clone(), &static_dir))
      .route("/health", web::get().to(health_check))
  })
  .bind((host.as_str(), port))?
  .run()
  .await?;

  Ok(())
}

async fn health_check() -> &'static str {
  "OK"
}
