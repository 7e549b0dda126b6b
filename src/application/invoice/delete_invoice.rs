use serde::Deserialize;
use std::sync::Arc;

use super::invoice_dto::InvoiceDto;
use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug, Deserialize)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: i64,
}

pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Returns the invoice as it was just before deletion
  pub async fn execute(&self, command: DeleteInvoiceCommand) -> Result<InvoiceDto, InvoiceError> {
    let deleted = self
      .invoice_service
      .delete_invoice(command.invoice_id)
      .await?;
    Ok(deleted.into())
  }
}
