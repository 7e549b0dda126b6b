pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod templates;

// Re-export commonly used types
pub use dtos::{ApiResponse, CreateInvoiceRequest, ErrorResponse, UpdateInvoiceRequest};
pub use errors::ApiError;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{InvoiceUseCases, configure_invoice_routes, configure_web_routes};
pub use templates::TemplateEngine;
