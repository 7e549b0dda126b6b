//! JSON pass-through from the web frontend to the invoice API.
//!
//! Backend status and body are returned unchanged. A backend that cannot
//! be reached, or answers with something other than JSON, becomes a 502.

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use reqwest::Method;
use serde_json::Value;

use crate::adapters::http::errors::ApiError;
use crate::infrastructure::backend::{BackendClient, BackendResponse};

fn parse_body(body: &web::Bytes) -> Result<Option<Value>, ApiError> {
  if body.is_empty() {
    return Ok(None);
  }

  serde_json::from_slice(body)
    .map(Some)
    .map_err(|e| ApiError::Validation(format!("Request body is not valid JSON: {}", e)))
}

fn relay(response: BackendResponse) -> HttpResponse {
  let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
  HttpResponse::build(status).json(response.body)
}

/// Turns a string `totalAmount` such as `"12.50"` into a JSON number.
/// Strings that do not parse are left for the API to reject.
pub fn coerce_total_amount(body: &mut Value) {
  let Some(amount) = body.get_mut("totalAmount") else {
    return;
  };

  let parsed = amount
    .as_str()
    .and_then(|raw| raw.trim().parse::<f64>().ok())
    .and_then(serde_json::Number::from_f64);

  if let Some(number) = parsed {
    *amount = Value::Number(number);
  }
}

/// Removes blank values from a raw query string
pub fn strip_blank_params(query: &str) -> Result<String, ApiError> {
  let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
    .map_err(|e| ApiError::Validation(format!("Invalid query string: {}", e)))?;

  let kept: Vec<(String, String)> = pairs
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .collect();

  serde_urlencoded::to_string(kept).map_err(|e| ApiError::Internal(e.to_string()))
}

// GET /api/invoices
pub async fn list_invoices_proxy(
  backend: web::Data<BackendClient>,
) -> Result<HttpResponse, ApiError> {
  let response = backend
    .forward(Method::GET, "/invoices", None, None)
    .await?;
  Ok(relay(response))
}

// POST /api/invoices
pub async fn create_invoice_proxy(
  body: web::Bytes,
  backend: web::Data<BackendClient>,
) -> Result<HttpResponse, ApiError> {
  let mut payload = parse_body(&body)?.unwrap_or(Value::Null);
  coerce_total_amount(&mut payload);

  let response = backend
    .forward(Method::POST, "/invoices", None, Some(&payload))
    .await?;
  Ok(relay(response))
}

// GET /api/invoices/filter
pub async fn filter_invoices_proxy(
  req: HttpRequest,
  backend: web::Data<BackendClient>,
) -> Result<HttpResponse, ApiError> {
  let query = strip_blank_params(req.query_string())?;

  let response = backend
    .forward(Method::GET, "/invoices/filter", Some(&query), None)
    .await?;
  Ok(relay(response))
}

// GET /api/invoices/{id}
pub async fn get_invoice_proxy(
  path: web::Path<i64>,
  backend: web::Data<BackendClient>,
) -> Result<HttpResponse, ApiError> {
  let response = backend
    .forward(
      Method::GET,
      &format!("/invoices/{}", path.into_inner()),
      None,
      None,
    )
    .await?;
  Ok(relay(response))
}

// PATCH /api/invoices/{id}
pub async fn update_invoice_proxy(
  path: web::Path<i64>,
  body: web::Bytes,
  backend: web::Data<BackendClient>,
) -> Result<HttpResponse, ApiError> {
  let payload = parse_body(&body)?.unwrap_or_else(|| Value::Object(Default::default()));

  let response = backend
    .forward(
      Method::PATCH,
      &format!("/invoices/{}", path.into_inner()),
      None,
      Some(&payload),
    )
    .await?;
  Ok(relay(response))
}

// DELETE /api/invoices/{id}
pub async fn delete_invoice_proxy(
  path: web::Path<i64>,
  backend: web::Data<BackendClient>,
) -> Result<HttpResponse, ApiError> {
  let response = backend
    .forward(
      Method::DELETE,
      &format!("/invoices/{}", path.into_inner()),
      None,
      None,
    )
    .await?;
  Ok(relay(response))
}
