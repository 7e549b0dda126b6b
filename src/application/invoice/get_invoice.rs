use serde::Deserialize;
use std::sync::Arc;

use super::invoice_dto::InvoiceDto;
use crate::domain::invoice::{InvoiceError, InvoiceService};

#[derive(Debug, Deserialize)]
pub struct GetInvoiceCommand {
  pub invoice_id: i64,
}

pub struct GetInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: GetInvoiceCommand) -> Result<InvoiceDto, InvoiceError> {
    let invoice = self.invoice_service.get_invoice(command.invoice_id).await?;
    Ok(invoice.into())
  }
}
