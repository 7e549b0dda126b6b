use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use super::payloads::{InvoiceChanges, NewInvoicePayload};
use crate::application::invoice::InvoiceDto;
use crate::infrastructure::config::BackendConfig;

#[derive(Debug, Error)]
pub enum BackendError {
  #[error("Backend unreachable: {0}")]
  Unreachable(String),

  #[error("Backend returned an invalid response: {0}")]
  InvalidResponse(String),

  /// Non-2xx answer from the API, carrying its own message
  #[error("Backend returned {status}: {message}")]
  Status { status: u16, message: String },
}

/// Raw backend answer, passed through by the JSON proxy
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResponse {
  pub status: u16,
  pub body: Value,
}

impl BackendResponse {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  fn message(&self) -> String {
    self
      .body
      .get("message")
      .and_then(Value::as_str)
      .unwrap_or("Request failed")
      .to_string()
  }

  /// Unwraps the `{message, data}` envelope of a successful response
  fn into_data<T: DeserializeOwned>(self) -> Result<T, BackendError> {
    if !self.is_success() {
      return Err(BackendError::Status {
        status: self.status,
        message: self.message(),
      });
    }

    let data = match self.body {
      Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
      _ => Value::Null,
    };
    serde_json::from_value(data).map_err(|e| BackendError::InvalidResponse(e.to_string()))
  }
}

#[derive(Clone)]
pub struct BackendClient {
  client: Client,
  base_url: String,
}

impl BackendClient {
  pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_seconds))
      .build()
      .map_err(|e| BackendError::Unreachable(e.to_string()))?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Sends a request to the API and returns its status and JSON body as is.
  ///
  /// `path` is relative to the base URL and `query` is an already encoded
  /// query string without the leading `?`.
  pub async fn forward(
    &self,
    method: Method,
    path: &str,
    query: Option<&str>,
    body: Option<&Value>,
  ) -> Result<BackendResponse, BackendError> {
    let mut url = format!("{}{}", self.base_url, path);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
      url.push('?');
      url.push_str(query);
    }

    tracing::debug!(%method, %url, "Calling backend");

    let mut request = self.client.request(method.clone(), &url);
    if let Some(body) = body {
      request = request.json(body);
    }

    let response = request.send().await.map_err(|e| {
      tracing::error!("Failed to send {} request to {}: {}", method, url, e);
      BackendError::Unreachable(e.to_string())
    })?;

    let status = response.status().as_u16();
    let bytes = response
      .bytes()
      .await
      .map_err(|e| BackendError::Unreachable(e.to_string()))?;

    let body = serde_json::from_slice(&bytes).map_err(|e| {
      tracing::error!("Backend answered {} with a non-JSON body: {}", url, e);
      BackendError::InvalidResponse(e.to_string())
    })?;

    Ok(BackendResponse { status, body })
  }

  async fn send_json<B: Serialize>(
    &self,
    method: Method,
    path: &str,
    body: &B,
  ) -> Result<BackendResponse, BackendError> {
    let body =
      serde_json::to_value(body).map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
    self.forward(method, path, None, Some(&body)).await
  }

  pub async fn list_invoices(&self) -> Result<Vec<InvoiceDto>, BackendError> {
    self
      .forward(Method::GET, "/invoices", None, None)
      .await?
      .into_data()
  }

  /// `params` are `(name, value)` pairs; blank values are dropped.
  pub async fn filter_invoices(
    &self,
    params: &[(&str, &str)],
  ) -> Result<Vec<InvoiceDto>, BackendError> {
    let query = encode_query(params)?;
    self
      .forward(Method::GET, "/invoices/filter", Some(&query), None)
      .await?
      .into_data()
  }

  pub async fn create_invoice(
    &self,
    payload: &NewInvoicePayload,
  ) -> Result<InvoiceDto, BackendError> {
    self
      .send_json(Method::POST, "/invoices", payload)
      .await?
      .into_data()
  }

  pub async fn update_invoice(
    &self,
    invoice_id: i64,
    changes: &InvoiceChanges,
  ) -> Result<InvoiceDto, BackendError> {
    self
      .send_json(Method::PATCH, &format!("/invoices/{}", invoice_id), changes)
      .await?
      .into_data()
  }

  pub async fn delete_invoice(&self, invoice_id: i64) -> Result<InvoiceDto, BackendError> {
    self
      .forward(
        Method::DELETE,
        &format!("/invoices/{}", invoice_id),
        None,
        None,
      )
      .await?
      .into_data()
  }
}

/// URL-encodes the non-blank pairs
pub(crate) fn encode_query(params: &[(&str, &str)]) -> Result<String, BackendError> {
  let kept: Vec<(&str, &str)> = params
    .iter()
    .copied()
    .filter(|(_, value)| !value.trim().is_empty())
    .collect();

  serde_urlencoded::to_string(kept).map_err(|e| BackendError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_encode_query_drops_blank_values() {
    let query = encode_query(&[
      ("startDate", "2024-01-01"),
      ("endDate", ""),
      ("paymentStatus", "paid"),
    ])
    .unwrap();
    assert_eq!(query, "startDate=2024-01-01&paymentStatus=paid");
  }

  #[test]
  fn test_into_data_unwraps_envelope() {
    let response = BackendResponse {
      status: 200,
      body: json!({"message": "ok", "data": [1, 2, 3]}),
    };
    let data: Vec<i32> = response.into_data().unwrap();
    assert_eq!(data, vec![1, 2, 3]);
  }

  #[test]
  fn test_into_data_reports_error_status() {
    let response = BackendResponse {
      status: 404,
      body: json!({"error": "not_found", "message": "Invoice 9 not found"}),
    };
    let err = response.into_data::<Value>().unwrap_err();
    match err {
      BackendError::Status { status, message } => {
        assert_eq!(status, 404);
        assert_eq!(message, "Invoice 9 not found");
      }
      other => panic!("unexpected error: {:?}", other),
    }
  }

  #[test]
  fn test_trailing_slash_is_trimmed() {
    let client = BackendClient::new(BackendConfig {
      base_url: "http://localhost:3000/".to_string(),
      timeout_seconds: 1,
    })
    .unwrap();
    assert_eq!(client.base_url(), "http://localhost:3000");
  }

  #[tokio::test]
  async fn test_unreachable_backend() {
    let client = BackendClient::new(BackendConfig {
      base_url: "http://127.0.0.1:1".to_string(),
      timeout_seconds: 1,
    })
    .unwrap();
    let err = client.list_invoices().await.unwrap_err();
    assert!(matches!(err, BackendError::Unreachable(_)));
  }
}
