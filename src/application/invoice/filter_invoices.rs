use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use super::invoice_dto::InvoiceDto;
use crate::domain::invoice::{InvoiceError, InvoiceFilter, InvoiceService, PaymentStatus};

#[derive(Debug, Default, Deserialize)]
pub struct FilterInvoicesCommand {
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub payment_status: Option<String>,
}

pub struct FilterInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl FilterInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: FilterInvoicesCommand,
  ) -> Result<Vec<InvoiceDto>, InvoiceError> {
    let mut filter = InvoiceFilter::new();
    if let Some(start_date) = command.start_date {
      filter = filter.with_start_date(start_date);
    }
    if let Some(end_date) = command.end_date {
      filter = filter.with_end_date(end_date);
    }
    if let Some(status) = command.payment_status {
      filter = filter.with_payment_status(PaymentStatus::new(status)?);
    }

    let invoices = self.invoice_service.filter_invoices(&filter).await?;
    Ok(invoices.into_iter().map(InvoiceDto::from).collect())
  }
}
