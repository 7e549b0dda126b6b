use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ApiResponse, CreateInvoiceRequest, FilterInvoicesQuery, UpdateInvoiceRequest},
  errors::ApiError,
};
use crate::application::invoice::{
  CreateInvoiceCommand, CreateInvoiceUseCase, DeleteInvoiceCommand, DeleteInvoiceUseCase,
  FileInput, FilterInvoicesCommand, FilterInvoicesUseCase, GetInvoiceCommand, GetInvoiceUseCase,
  ListInvoicesUseCase, UpdateInvoiceCommand, UpdateInvoiceUseCase,
};

/// Blank query values count as not supplied
fn non_blank(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

fn parse_date(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, ApiError> {
  non_blank(value)
    .map(|raw| {
      NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ApiError::Validation(format!("{} must be a date in YYYY-MM-DD format", field))
      })
    })
    .transpose()
}

impl FilterInvoicesQuery {
  fn into_command(self) -> Result<FilterInvoicesCommand, ApiError> {
    Ok(FilterInvoicesCommand {
      start_date: parse_date("startDate", self.start_date)?,
      end_date: parse_date("endDate", self.end_date)?,
      payment_status: non_blank(self.payment_status),
    })
  }
}

/// POST /invoices
/// Body: CreateInvoiceRequest (JSON)
/// Response: 201 `{message, data: Invoice}`
pub async fn create_invoice_handler(
  request: web::Json<CreateInvoiceRequest>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = CreateInvoiceCommand {
    customer_name: request.customer_name,
    invoice_number: request.invoice_number,
    total_amount: request.total_amount,
    payment_status: request.payment_status,
    files: request
      .files
      .unwrap_or_default()
      .into_iter()
      .map(FileInput::from)
      .collect(),
  };

  let invoice = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(ApiResponse::new("Invoice created successfully", invoice)))
}

/// GET /invoices
pub async fn list_invoices_handler(
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoices = use_case.execute().await?;

  Ok(HttpResponse::Ok().json(ApiResponse::new("Invoices retrieved successfully", invoices)))
}

/// GET /invoices/filter?startDate=&endDate=&paymentStatus=
pub async fn filter_invoices_handler(
  query: web::Query<FilterInvoicesQuery>,
  use_case: web::Data<Arc<FilterInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = query.into_inner().into_command()?;
  let invoices = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::new("Invoices filtered successfully", invoices)))
}

/// GET /invoices/{id}
pub async fn get_invoice_handler(
  path: web::Path<i64>,
  use_case: web::Data<Arc<GetInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoice = use_case
    .execute(GetInvoiceCommand {
      invoice_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(ApiResponse::new("Invoice retrieved successfully", invoice)))
}

/// PATCH /invoices/{id}
/// Body: UpdateInvoiceRequest (JSON), any subset of the create fields
pub async fn update_invoice_handler(
  path: web::Path<i64>,
  request: web::Json<UpdateInvoiceRequest>,
  use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let request = request.into_inner();

  let command = UpdateInvoiceCommand {
    invoice_id: path.into_inner(),
    customer_name: request.customer_name,
    invoice_number: request.invoice_number,
    total_amount: request.total_amount,
    payment_status: request.payment_status,
    files: request
      .files
      .map(|files| files.into_iter().map(FileInput::from).collect()),
  };

  let invoice = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ApiResponse::new("Invoice updated successfully", invoice)))
}

/// DELETE /invoices/{id}
/// Response: 200 with the deleted invoice
pub async fn delete_invoice_handler(
  path: web::Path<i64>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoice = use_case
    .execute(DeleteInvoiceCommand {
      invoice_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(ApiResponse::new("Invoice deleted successfully", invoice)))
}
