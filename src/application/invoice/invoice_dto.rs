use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::invoice::{FileName, FilePath, FileRef, Invoice, InvoiceError, NewFileRef};

/// Wire shape of an invoice. Shared by the API responses and the web
/// frontend's backend client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
  pub id: i64,
  pub customer_name: String,
  pub invoice_number: String,
  pub total_amount: f64,
  pub payment_status: String,
  pub date_created: DateTime<Utc>,
  #[serde(default)]
  pub files: Vec<FileRefDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRefDto {
  pub id: i64,
  pub invoice_id: i64,
  pub file_name: String,
  pub file_path: String,
}

impl From<Invoice> for InvoiceDto {
  fn from(invoice: Invoice) -> Self {
    Self {
      id: invoice.id,
      customer_name: invoice.customer_name.into_inner(),
      invoice_number: invoice.invoice_number.into_inner(),
      total_amount: invoice.total_amount.to_f64(),
      payment_status: invoice.payment_status.into_inner(),
      date_created: invoice.date_created,
      files: invoice.files.into_iter().map(FileRefDto::from).collect(),
    }
  }
}

impl From<FileRef> for FileRefDto {
  fn from(file: FileRef) -> Self {
    Self {
      id: file.id,
      invoice_id: file.invoice_id,
      file_name: file.file_name.value().to_string(),
      file_path: file.file_path.value().to_string(),
    }
  }
}

/// A file attachment as supplied by a caller, before it has an id
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileInput {
  pub file_name: String,
  pub file_path: String,
}

impl FileInput {
  pub fn new(file_name: impl Into<String>, file_path: impl Into<String>) -> Self {
    Self {
      file_name: file_name.into(),
      file_path: file_path.into(),
    }
  }
}

impl TryFrom<FileInput> for NewFileRef {
  type Error = InvoiceError;

  fn try_from(input: FileInput) -> Result<Self, Self::Error> {
    Ok(NewFileRef::new(
      FileName::new(input.file_name)?,
      FilePath::new(input.file_path)?,
    ))
  }
}

pub(crate) fn into_new_files(files: Vec<FileInput>) -> Result<Vec<NewFileRef>, InvoiceError> {
  files.into_iter().map(NewFileRef::try_from).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invoice_dto_uses_camel_case() {
    let json = serde_json::json!({
      "id": 1,
      "customerName": "A",
      "invoiceNumber": "1",
      "totalAmount": 100.0,
      "paymentStatus": "unpaid",
      "dateCreated": "2024-01-01T00:00:00Z",
      "files": [{"id": 1, "invoiceId": 1, "fileName": "a", "filePath": "pathA"}]
    });

    let dto: InvoiceDto = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(dto.files[0].file_path, "pathA");
    assert_eq!(serde_json::to_value(&dto).unwrap(), json);
  }

  #[test]
  fn test_blank_file_input_is_rejected() {
    let result = NewFileRef::try_from(FileInput::new("  ", "/files/a.pdf"));
    assert!(matches!(result, Err(InvoiceError::Validation(_))));
  }
}
