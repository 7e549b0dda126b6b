use std::sync::Arc;

use super::entities::{Invoice, NewFileRef, NewInvoice};
use super::errors::InvoiceError;
use super::filter::InvoiceFilter;
use super::ports::InvoiceRepository;
use super::update_policy::InvoicePatch;
use super::value_objects::{CustomerName, InvoiceNumber, PaymentStatus, TotalAmount};

/// Invoice creation data
pub struct InvoiceData {
  pub customer_name: CustomerName,
  pub invoice_number: InvoiceNumber,
  pub total_amount: TotalAmount,
  pub payment_status: PaymentStatus,
  pub files: Vec<NewFileRef>,
}

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
}

impl InvoiceService {
  pub fn new(invoice_repo: Arc<dyn InvoiceRepository>) -> Self {
    Self { invoice_repo }
  }

  pub async fn create_invoice(&self, data: InvoiceData) -> Result<Invoice, InvoiceError> {
    let invoice = NewInvoice::new(
      data.customer_name,
      data.invoice_number,
      data.total_amount,
      data.payment_status,
      data.files,
    );

    let created = self.invoice_repo.create(invoice).await?;
    tracing::info!(
      invoice_id = created.id,
      files = created.file_count(),
      "Created invoice {}",
      created.invoice_number
    );

    Ok(created)
  }

  pub async fn list_invoices(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let invoices = self.invoice_repo.find_all().await?;
    tracing::debug!("Listed {} invoices", invoices.len());
    Ok(invoices)
  }

  pub async fn get_invoice(&self, invoice_id: i64) -> Result<Invoice, InvoiceError> {
    self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(InvoiceError::NotFound(invoice_id))
  }

  pub async fn filter_invoices(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, InvoiceError> {
    if filter.is_empty() {
      return self.list_invoices().await;
    }

    let invoices = self.invoice_repo.find_filtered(filter).await?;
    tracing::debug!(?filter, "Filter matched {} invoices", invoices.len());
    Ok(invoices)
  }

  pub async fn update_invoice(
    &self,
    invoice_id: i64,
    patch: InvoicePatch,
  ) -> Result<Invoice, InvoiceError> {
    // Existence is settled before anything is written
    self.get_invoice(invoice_id).await?;

    if patch.is_empty() {
      tracing::debug!(invoice_id, "Empty patch, invoice left as is");
    }
    let replaces_files = patch.files.is_some();

    let updated = self
      .invoice_repo
      .update(invoice_id, patch)
      .await?
      .ok_or(InvoiceError::NotFound(invoice_id))?;

    tracing::info!(
      invoice_id,
      replaced_files = replaces_files,
      "Updated invoice {}",
      updated.invoice_number
    );

    Ok(updated)
  }

  pub async fn delete_invoice(&self, invoice_id: i64) -> Result<Invoice, InvoiceError> {
    self.get_invoice(invoice_id).await?;

    let deleted = self
      .invoice_repo
      .delete(invoice_id)
      .await?
      .ok_or(InvoiceError::NotFound(invoice_id))?;

    tracing::info!(
      invoice_id,
      files = deleted.file_count(),
      "Deleted invoice {}",
      deleted.invoice_number
    );

    Ok(deleted)
  }
}
