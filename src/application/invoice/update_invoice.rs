use serde::Deserialize;
use std::sync::Arc;

use super::invoice_dto::{FileInput, InvoiceDto, into_new_files};
use crate::domain::invoice::{
  CustomerName, InvoiceError, InvoiceNumber, InvoicePatch, InvoiceService, PaymentStatus,
  TotalAmount,
};

/// `None` fields are left unchanged. `files: Some(vec![])` removes every file.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInvoiceCommand {
  pub invoice_id: i64,
  pub customer_name: Option<String>,
  pub invoice_number: Option<String>,
  pub total_amount: Option<f64>,
  pub payment_status: Option<String>,
  pub files: Option<Vec<FileInput>>,
}

impl UpdateInvoiceCommand {
  fn into_patch(self) -> Result<InvoicePatch, InvoiceError> {
    Ok(InvoicePatch {
      customer_name: self.customer_name.map(CustomerName::new).transpose()?,
      invoice_number: self.invoice_number.map(InvoiceNumber::new).transpose()?,
      total_amount: self.total_amount.map(TotalAmount::from_f64).transpose()?,
      payment_status: self.payment_status.map(PaymentStatus::new).transpose()?,
      files: self.files.map(into_new_files).transpose()?,
    })
  }
}

pub struct UpdateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: UpdateInvoiceCommand) -> Result<InvoiceDto, InvoiceError> {
    let invoice_id = command.invoice_id;
    let patch = command.into_patch()?;

    let invoice = self
      .invoice_service
      .update_invoice(invoice_id, patch)
      .await?;
    Ok(invoice.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_absent_fields_stay_absent() {
    let patch = UpdateInvoiceCommand {
      invoice_id: 1,
      payment_status: Some("paid".to_string()),
      ..Default::default()
    }
    .into_patch()
    .unwrap();

    assert!(patch.customer_name.is_none());
    assert!(patch.files.is_none());
    assert_eq!(patch.payment_status.unwrap().as_str(), "paid");
  }

  #[test]
  fn test_empty_files_clear() {
    let patch = UpdateInvoiceCommand {
      invoice_id: 1,
      files: Some(vec![]),
      ..Default::default()
    }
    .into_patch()
    .unwrap();

    assert_eq!(patch.files, Some(vec![]));
  }

  #[test]
  fn test_blank_name_is_rejected() {
    let result = UpdateInvoiceCommand {
      invoice_id: 1,
      customer_name: Some("   ".to_string()),
      ..Default::default()
    }
    .into_patch();

    assert!(matches!(result, Err(InvoiceError::Validation(_))));
  }
}
