use std::sync::Arc;

use super::invoice_dto::InvoiceDto;
use crate::domain::invoice::{InvoiceError, InvoiceService};

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self) -> Result<Vec<InvoiceDto>, InvoiceError> {
    let invoices = self.invoice_service.list_invoices().await?;
    Ok(invoices.into_iter().map(InvoiceDto::from).collect())
  }
}
