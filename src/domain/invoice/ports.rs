use async_trait::async_trait;

use super::entities::{Invoice, NewInvoice};
use super::errors::InvoiceError;
use super::filter::InvoiceFilter;
use super::update_policy::InvoicePatch;

/// Persistence port for invoices and their files.
///
/// Every method is one atomic unit of work. Returned invoices always carry
/// their complete file collection.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError>;

  /// All invoices in ascending id order.
  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError>;

  async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, InvoiceError>;

  async fn find_filtered(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, InvoiceError>;

  /// Applies `UpdatePolicy` to the stored row under a write lock.
  /// Returns `None` without writing anything when the id does not exist.
  async fn update(&self, id: i64, patch: InvoicePatch) -> Result<Option<Invoice>, InvoiceError>;

  /// Removes the invoice and its files, returning the pre-deletion snapshot.
  async fn delete(&self, id: i64) -> Result<Option<Invoice>, InvoiceError>;
}
