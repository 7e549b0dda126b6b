use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::invoice::FileInput;

/// File attachment in a create or update request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FileRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "fileName must be between 1 and 255 characters"
  ))]
  pub file_name: String,

  #[validate(length(
    min = 1,
    max = 2048,
    message = "filePath must be between 1 and 2048 characters"
  ))]
  pub file_path: String,
}

impl From<FileRequest> for FileInput {
  fn from(file: FileRequest) -> Self {
    FileInput::new(file.file_name, file.file_path)
  }
}

/// Request body of `POST /invoices`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "customerName must be between 1 and 255 characters"
  ))]
  pub customer_name: String,

  #[validate(length(
    min = 1,
    max = 255,
    message = "invoiceNumber must be between 1 and 255 characters"
  ))]
  pub invoice_number: String,

  pub total_amount: f64,

  #[validate(length(
    min = 1,
    max = 255,
    message = "paymentStatus must be between 1 and 255 characters"
  ))]
  pub payment_status: String,

  /// Absent or `null` means no files
  #[serde(default)]
  #[validate(nested)]
  pub files: Option<Vec<FileRequest>>,
}

/// Request body of `PATCH /invoices/{id}`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
  #[validate(length(
    min = 1,
    max = 255,
    message = "customerName must be between 1 and 255 characters"
  ))]
  pub customer_name: Option<String>,

  #[validate(length(
    min = 1,
    max = 255,
    message = "invoiceNumber must be between 1 and 255 characters"
  ))]
  pub invoice_number: Option<String>,

  pub total_amount: Option<f64>,

  #[validate(length(
    min = 1,
    max = 255,
    message = "paymentStatus must be between 1 and 255 characters"
  ))]
  pub payment_status: Option<String>,

  /// `[]` removes all files, absent or `null` keeps them
  #[serde(default)]
  #[validate(nested)]
  pub files: Option<Vec<FileRequest>>,
}

/// Query string of `GET /invoices/filter`, as raw strings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInvoicesQuery {
  pub start_date: Option<String>,
  pub end_date: Option<String>,
  pub payment_status: Option<String>,
}

/// Success envelope shared by every invoice endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
  pub message: String,
  pub data: T,
}

impl<T> ApiResponse<T> {
  pub fn new(message: impl Into<String>, data: T) -> Self {
    Self {
      message: message.into(),
      data,
    }
  }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}
