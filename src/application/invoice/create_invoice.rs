use serde::Deserialize;
use std::sync::Arc;

use super::invoice_dto::{FileInput, InvoiceDto, into_new_files};
use crate::domain::invoice::{
  CustomerName, InvoiceData, InvoiceError, InvoiceNumber, InvoiceService, PaymentStatus,
  TotalAmount,
};

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub customer_name: String,
  pub invoice_number: String,
  pub total_amount: f64,
  pub payment_status: String,
  pub files: Vec<FileInput>,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: CreateInvoiceCommand) -> Result<InvoiceDto, InvoiceError> {
    let invoice_data = InvoiceData {
      customer_name: CustomerName::new(command.customer_name)?,
      invoice_number: InvoiceNumber::new(command.invoice_number)?,
      total_amount: TotalAmount::from_f64(command.total_amount)?,
      payment_status: PaymentStatus::new(command.payment_status)?,
      files: into_new_files(command.files)?,
    };

    let invoice = self.invoice_service.create_invoice(invoice_data).await?;
    Ok(invoice.into())
  }
}
