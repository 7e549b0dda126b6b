use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
  pub file_name: String,
  pub file_path: String,
}

/// Body of `POST /invoices`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoicePayload {
  pub customer_name: String,
  pub invoice_number: String,
  pub total_amount: f64,
  pub payment_status: String,
  pub files: Vec<FilePayload>,
}

/// Body of `PATCH /invoices/{id}`. Unset fields are omitted so the API
/// leaves them alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceChanges {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub customer_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub invoice_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub total_amount: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub payment_status: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub files: Option<Vec<FilePayload>>,
}
