use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::invoice::InvoiceError;
use crate::infrastructure::backend::BackendError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Unknown resource (404 Not Found)
  NotFound(String),

  /// Upstream API failed or was unreachable (502 Bad Gateway)
  BadGateway(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::BadGateway(msg) => {
        tracing::error!("Backend error: {}", msg);
        ("bad_gateway", "The invoice service is unavailable".to_string())
      }
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(err) => ApiError::Validation(err.to_string()),
      InvoiceError::NotFound(id) => ApiError::NotFound(format!("Invoice {} not found", id)),
      InvoiceError::Repository(msg) => ApiError::Internal(format!("Repository error: {}", msg)),
      InvoiceError::Database(err) => ApiError::Internal(format!("Database error: {}", err)),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages = Vec::new();
    collect_messages(&errors, &mut messages);
    ApiError::Validation(messages.join(", "))
  }
}

fn collect_messages(errors: &validator::ValidationErrors, messages: &mut Vec<String>) {
  use validator::ValidationErrorsKind;

  for (field, kind) in errors.errors() {
    match kind {
      ValidationErrorsKind::Field(field_errors) => {
        messages.extend(field_errors.iter().map(|error| {
          error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid field: {}", field))
        }));
      }
      ValidationErrorsKind::Struct(nested) => collect_messages(nested, messages),
      ValidationErrorsKind::List(items) => {
        for nested in items.values() {
          collect_messages(nested, messages);
        }
      }
    }
  }
}

/// A backend that answered with an error keeps its status class, anything
/// else means the gateway failed
impl From<BackendError> for ApiError {
  fn from(error: BackendError) -> Self {
    match error {
      BackendError::Status { status, message } => match status {
        400 => ApiError::Validation(message),
        404 => ApiError::NotFound(message),
        _ => ApiError::BadGateway(format!("Backend returned {}: {}", status, message)),
      },
      other => ApiError::BadGateway(other.to_string()),
    }
  }
}
