use super::entities::{Invoice, NewFileRef};
use super::value_objects::{CustomerName, InvoiceNumber, PaymentStatus, TotalAmount};

/// Partial update payload. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoicePatch {
  pub customer_name: Option<CustomerName>,
  pub invoice_number: Option<InvoiceNumber>,
  pub total_amount: Option<TotalAmount>,
  pub payment_status: Option<PaymentStatus>,
  /// `Some(vec![])` clears every file; `None` leaves files untouched.
  pub files: Option<Vec<NewFileRef>>,
}

impl InvoicePatch {
  pub fn is_empty(&self) -> bool {
    self.customer_name.is_none()
      && self.invoice_number.is_none()
      && self.total_amount.is_none()
      && self.payment_status.is_none()
      && self.files.is_none()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileChange {
  Keep,
  Replace(Vec<NewFileRef>),
}

/// Full replacement values for a stored invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
  pub customer_name: CustomerName,
  pub invoice_number: InvoiceNumber,
  pub total_amount: TotalAmount,
  pub payment_status: PaymentStatus,
  pub files: FileChange,
}

impl UpdatePlan {
  /// Writes the plan onto an in-memory invoice. Replacement files receive
  /// ids from `next_file_id`. `id` and `date_created` are left alone.
  pub fn apply_to(self, invoice: &mut Invoice, mut next_file_id: impl FnMut() -> i64) {
    invoice.customer_name = self.customer_name;
    invoice.invoice_number = self.invoice_number;
    invoice.total_amount = self.total_amount;
    invoice.payment_status = self.payment_status;

    if let FileChange::Replace(files) = self.files {
      let invoice_id = invoice.id;
      invoice.files = files
        .into_iter()
        .map(|file| file.attach(next_file_id(), invoice_id))
        .collect();
    }
  }
}

pub struct UpdatePolicy;

impl UpdatePolicy {
  /// Merges a patch onto the current state of an invoice.
  pub fn plan(existing: &Invoice, patch: InvoicePatch) -> UpdatePlan {
    UpdatePlan {
      customer_name: patch
        .customer_name
        .unwrap_or_else(|| existing.customer_name.clone()),
      invoice_number: patch
        .invoice_number
        .unwrap_or_else(|| existing.invoice_number.clone()),
      total_amount: patch.total_amount.unwrap_or(existing.total_amount),
      payment_status: patch
        .payment_status
        .unwrap_or_else(|| existing.payment_status.clone()),
      files: match patch.files {
        Some(files) => FileChange::Replace(files),
        None => FileChange::Keep,
      },
    }
  }
}
