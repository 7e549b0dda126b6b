use actix_files as fs;
use actix_web::{HttpRequest, error, web};
use std::sync::Arc;

use crate::application::invoice::{
  CreateInvoiceUseCase, DeleteInvoiceUseCase, FilterInvoicesUseCase, GetInvoiceUseCase,
  ListInvoicesUseCase, UpdateInvoiceUseCase,
};
use crate::domain::invoice::{InvoiceRepository, InvoiceService};
use crate::infrastructure::backend::BackendClient;

use super::errors::ApiError;
use super::handlers::invoices::{
  create_invoice_handler, delete_invoice_handler, filter_invoices_handler, get_invoice_handler,
  list_invoices_handler, update_invoice_handler,
};
use super::handlers::{invoices_web, proxy};
use super::templates::TemplateEngine;

/// Use cases backing the invoice REST API
#[derive(Clone)]
pub struct InvoiceUseCases {
  pub create: Arc<CreateInvoiceUseCase>,
  pub list: Arc<ListInvoicesUseCase>,
  pub filter: Arc<FilterInvoicesUseCase>,
  pub get: Arc<GetInvoiceUseCase>,
  pub update: Arc<UpdateInvoiceUseCase>,
  pub delete: Arc<DeleteInvoiceUseCase>,
}

impl InvoiceUseCases {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self {
      create: Arc::new(CreateInvoiceUseCase::new(invoice_service.clone())),
      list: Arc::new(ListInvoicesUseCase::new(invoice_service.clone())),
      filter: Arc::new(FilterInvoicesUseCase::new(invoice_service.clone())),
      get: Arc::new(GetInvoiceUseCase::new(invoice_service.clone())),
      update: Arc::new(UpdateInvoiceUseCase::new(invoice_service.clone())),
      delete: Arc::new(DeleteInvoiceUseCase::new(invoice_service)),
    }
  }

  pub fn from_repository(invoice_repo: Arc<dyn InvoiceRepository>) -> Self {
    Self::new(Arc::new(InvoiceService::new(invoice_repo)))
  }
}

/// Maps extractor failures (bad JSON, bad query, non-numeric id) onto the
/// standard 400 error body
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(
      web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _: &HttpRequest| {
        ApiError::Validation(format!("Invalid JSON body: {}", err)).into()
      }),
    )
    .app_data(
      web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _: &HttpRequest| {
        ApiError::Validation(format!("Invalid query string: {}", err)).into()
      }),
    )
    .app_data(
      web::PathConfig::default().error_handler(|err: error::PathError, _: &HttpRequest| {
        ApiError::Validation(format!("Invalid path parameter: {}", err)).into()
      }),
    )
    .app_data(
      web::FormConfig::default().error_handler(|err: error::UrlencodedError, _: &HttpRequest| {
        ApiError::Validation(format!("Invalid form data: {}", err)).into()
      }),
    );
}

/// Configure invoice API routes
///
/// Mounts the invoice endpoints under the provided scope (e.g. /invoices).
///
/// # Routes
///
/// - POST / - Create an invoice with its files
/// - GET / - List all invoices
/// - GET /filter - Filter by creation date range and payment status
/// - GET /{id} - Get one invoice
/// - PATCH /{id} - Partially update an invoice
/// - DELETE /{id} - Delete an invoice and its files
///
/// `/filter` is registered before `/{id}` so it is never read as an id.
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use invoicer::adapters::http::routes::{InvoiceUseCases, configure_invoice_routes};
/// # use invoicer::infrastructure::persistence::memory::InMemoryInvoiceRepository;
///
/// let use_cases = InvoiceUseCases::from_repository(Arc::new(InMemoryInvoiceRepository::new()));
/// let app = App::new().service(
///   web::scope("/invoices").configure(|cfg| configure_invoice_routes(cfg, use_cases)),
/// );
/// ```
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig, use_cases: InvoiceUseCases) {
  configure_extractors(cfg);

  cfg
    .app_data(web::Data::new(use_cases.create))
    .app_data(web::Data::new(use_cases.list))
    .app_data(web::Data::new(use_cases.filter))
    .app_data(web::Data::new(use_cases.get))
    .app_data(web::Data::new(use_cases.update))
    .app_data(web::Data::new(use_cases.delete))
    .route("", web::post().to(create_invoice_handler))
    .route("", web::get().to(list_invoices_handler))
    .route("/filter", web::get().to(filter_invoices_handler))
    .route("/{id}", web::get().to(get_invoice_handler))
    .route("/{id}", web::patch().to(update_invoice_handler))
    .route("/{id}", web::delete().to(delete_invoice_handler));
}

/// Configure web frontend routes: dashboard, form posts, JSON proxy and
/// static assets
pub fn configure_web_routes(
  cfg: &mut web::ServiceConfig,
  templates: TemplateEngine,
  backend: BackendClient,
  static_dir: &str,
) {
  configure_extractors(cfg);

  cfg
    .app_data(web::Data::new(templates))
    .app_data(web::Data::new(backend))
    // Pages and form posts
    .route("/", web::get().to(invoices_web::dashboard_page))
    .route("/invoices", web::post().to(invoices_web::create_invoice_submit))
    .route(
      "/invoices/{id}/edit",
      web::post().to(invoices_web::edit_invoice_submit),
    )
    .route(
      "/invoices/{id}/delete",
      web::post().to(invoices_web::delete_invoice_submit),
    )
    // JSON proxy
    .route("/api/invoices", web::get().to(proxy::list_invoices_proxy))
    .route("/api/invoices", web::post().to(proxy::create_invoice_proxy))
    .route(
      "/api/invoices/filter",
      web::get().to(proxy::filter_invoices_proxy),
    )
    .route("/api/invoices/{id}", web::get().to(proxy::get_invoice_proxy))
    .route(
      "/api/invoices/{id}",
      web::patch().to(proxy::update_invoice_proxy),
    )
    .route(
      "/api/invoices/{id}",
      web::delete().to(proxy::delete_invoice_proxy),
    )
    // Static files
    .service(fs::Files::new("/static", static_dir));
}
