use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, http::header, web};
use serde::{Deserialize, Serialize};

use crate::adapters::http::{errors::ApiError, middleware::RequestIdExt, templates::TemplateEngine};
use crate::application::invoice::InvoiceDto;
use crate::infrastructure::backend::{
  BackendClient, BackendError, FilePayload, InvoiceChanges, NewInvoicePayload,
};

/// Dashboard query string, mirrors the filter modal
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub start_date: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_date: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub payment_status: Option<String>,
}

impl DashboardQuery {
  fn params(&self) -> Vec<(&'static str, &str)> {
    [
      ("startDate", self.start_date.as_deref()),
      ("endDate", self.end_date.as_deref()),
      ("paymentStatus", self.payment_status.as_deref()),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.map(|v| (name, v)))
    .filter(|(_, value)| !value.trim().is_empty())
    .collect()
  }
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceForm {
  pub customer_name: String,
  pub invoice_number: String,
  pub total_amount: String,
  pub payment_status: String,
  #[serde(default)]
  pub files: String,
}

/// Blank fields are left unchanged. Files are only sent when
/// `replace_files` is ticked.
#[derive(Debug, Default, Deserialize)]
pub struct EditInvoiceForm {
  #[serde(default)]
  pub customer_name: String,
  #[serde(default)]
  pub invoice_number: String,
  #[serde(default)]
  pub total_amount: String,
  #[serde(default)]
  pub payment_status: String,
  #[serde(default)]
  pub replace_files: Option<String>,
  #[serde(default)]
  pub files: String,
}

/// Blank means "leave unchanged". Anything else is sent as typed.
fn blank_to_none(value: String) -> Option<String> {
  if value.trim().is_empty() {
    None
  } else {
    Some(value)
  }
}

fn parse_amount(raw: &str) -> Result<f64, ApiError> {
  raw
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|amount| amount.is_finite())
    .ok_or_else(|| ApiError::Validation(format!("Total amount '{}' is not a number", raw.trim())))
}

/// Parses the files textarea: one `fileName | filePath` per line, blank
/// lines ignored.
pub fn parse_file_lines(text: &str) -> Result<Vec<FilePayload>, ApiError> {
  text
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(|line| {
      let (name, path) = line.split_once('|').ok_or_else(|| {
        ApiError::Validation(format!("Expected 'fileName | filePath', got '{}'", line))
      })?;
      let (name, path) = (name.trim(), path.trim());
      if name.is_empty() || path.is_empty() {
        return Err(ApiError::Validation(format!(
          "File name and path are both required in '{}'",
          line
        )));
      }

      Ok(FilePayload {
        file_name: name.to_string(),
        file_path: path.to_string(),
      })
    })
    .collect()
}

impl TryFrom<CreateInvoiceForm> for NewInvoicePayload {
  type Error = ApiError;

  fn try_from(form: CreateInvoiceForm) -> Result<Self, Self::Error> {
    Ok(NewInvoicePayload {
      total_amount: parse_amount(&form.total_amount)?,
      files: parse_file_lines(&form.files)?,
      customer_name: form.customer_name,
      invoice_number: form.invoice_number,
      payment_status: form.payment_status,
    })
  }
}

impl TryFrom<EditInvoiceForm> for InvoiceChanges {
  type Error = ApiError;

  fn try_from(form: EditInvoiceForm) -> Result<Self, Self::Error> {
    let files = match form.replace_files {
      Some(_) => Some(parse_file_lines(&form.files)?),
      None => None,
    };

    Ok(InvoiceChanges {
      customer_name: blank_to_none(form.customer_name),
      invoice_number: blank_to_none(form.invoice_number),
      total_amount: blank_to_none(form.total_amount)
        .map(|raw| parse_amount(&raw))
        .transpose()?,
      payment_status: blank_to_none(form.payment_status),
      files,
    })
  }
}

fn redirect_home() -> HttpResponse {
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, "/"))
    .finish()
}

/// Summary counters. Always taken over every stored invoice, never the
/// filtered grid.
#[derive(Debug, Default, Clone, Copy)]
struct DashboardCounts {
  total: usize,
  paid: usize,
  unpaid: usize,
}

async fn load_counts(
  backend: &BackendClient,
) -> Result<(Vec<InvoiceDto>, DashboardCounts), BackendError> {
  let (all, paid, unpaid) = futures_util::try_join!(
    backend.list_invoices(),
    backend.filter_invoices(&[("paymentStatus", "paid")]),
    backend.filter_invoices(&[("paymentStatus", "unpaid")]),
  )?;

  let counts = DashboardCounts {
    total: all.len(),
    paid: paid.len(),
    unpaid: unpaid.len(),
  };
  Ok((all, counts))
}

async fn load_dashboard(
  backend: &BackendClient,
  params: &[(&str, &str)],
) -> Result<(Vec<InvoiceDto>, DashboardCounts), BackendError> {
  let (all, counts) = load_counts(backend).await?;

  let invoices = if params.is_empty() {
    all
  } else {
    backend.filter_invoices(params).await?
  };
  Ok((invoices, counts))
}

fn render_dashboard(
  templates: &TemplateEngine,
  invoices: &[InvoiceDto],
  counts: DashboardCounts,
  query: &DashboardQuery,
  error: Option<String>,
) -> Result<String, ApiError> {
  let mut context = tera::Context::new();
  context.insert("invoices", invoices);
  context.insert("total_count", &counts.total);
  context.insert("paid_count", &counts.paid);
  context.insert("unpaid_count", &counts.unpaid);
  context.insert("filter", query);
  context.insert("error", &error);

  templates
    .render("pages/dashboard.html.tera", &context)
    .map_err(|e| ApiError::Internal(format!("Template error: {}", e)))
}

// GET / - Dashboard with counters, cards and modals
pub async fn dashboard_page(
  req: HttpRequest,
  query: web::Query<DashboardQuery>,
  templates: web::Data<TemplateEngine>,
  backend: web::Data<BackendClient>,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();
  let params = query.params();

  let (status, invoices, counts, error) = match load_dashboard(&backend, &params).await {
    Ok((invoices, counts)) => (StatusCode::OK, invoices, counts, None),
    Err(e) => {
      tracing::warn!(request_id = ?req.request_id(), "Dashboard could not load invoices: {}", e);
      let api_error = ApiError::from(e);
      let message = match &api_error {
        ApiError::Validation(msg) => msg.clone(),
        _ => "Could not load invoices from the invoice service".to_string(),
      };
      (
        api_error.status_code(),
        Vec::new(),
        DashboardCounts::default(),
        Some(message),
      )
    }
  };

  let html = render_dashboard(&templates, &invoices, counts, &query, error)?;
  Ok(HttpResponse::build(status).content_type("text/html").body(html))
}

// POST /invoices - Create modal submit
pub async fn create_invoice_submit(
  form: web::Form<CreateInvoiceForm>,
  backend: web::Data<BackendClient>,
) -> Result<HttpResponse, ApiError> {
  let payload = NewInvoicePayload::try_from(form.into_inner())?;
  let created = backend.create_invoice(&payload).await?;

  tracing::info!(invoice_id = created.id, "Invoice created from dashboard");
  Ok(redirect_home())
}

// POST /invoices/{id}/edit - Edit modal submit
pub async fn edit_invoice_submit(
  path: web::Path<i64>,
  form: web::Form<EditInvoiceForm>,
  backend: web::Data<BackendClient>,
) -> Result<HttpResponse, ApiError> {
  let invoice_id = path.into_inner();
  let changes = InvoiceChanges::try_from(form.into_inner())?;
  backend.update_invoice(invoice_id, &changes).await?;

  tracing::info!(invoice_id, "Invoice updated from dashboard");
  Ok(redirect_home())
}

// POST /invoices/{id}/delete
pub async fn delete_invoice_submit(
  path: web::Path<i64>,
  backend: web::Data<BackendClient>,
) -> Result<HttpResponse, ApiError> {
  let invoice_id = path.into_inner();
  backend.delete_invoice(invoice_id).await?;

  tracing::info!(invoice_id, "Invoice deleted from dashboard");
  Ok(redirect_home())
}
