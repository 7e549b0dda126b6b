use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{
  CustomerName, FileName, FilePath, InvoiceNumber, PaymentStatus, TotalAmount,
};

// Invoice - persisted billing document with its attached files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: i64,
  pub customer_name: CustomerName,
  pub invoice_number: InvoiceNumber,
  pub total_amount: TotalAmount,
  pub payment_status: PaymentStatus,
  pub date_created: DateTime<Utc>,
  pub files: Vec<FileRef>,
}

impl Invoice {
  pub fn has_status(&self, status: &str) -> bool {
    self.payment_status.as_str() == status
  }

  pub fn file_count(&self) -> usize {
    self.files.len()
  }
}

// File Ref - metadata of a file owned by exactly one invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
  pub id: i64,
  pub invoice_id: i64,
  pub file_name: FileName,
  pub file_path: FilePath,
}

/// An invoice that has not been stored yet.
///
/// `date_created` is stamped here and is never taken from a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
  pub customer_name: CustomerName,
  pub invoice_number: InvoiceNumber,
  pub total_amount: TotalAmount,
  pub payment_status: PaymentStatus,
  pub date_created: DateTime<Utc>,
  pub files: Vec<NewFileRef>,
}

impl NewInvoice {
  pub fn new(
    customer_name: CustomerName,
    invoice_number: InvoiceNumber,
    total_amount: TotalAmount,
    payment_status: PaymentStatus,
    files: Vec<NewFileRef>,
  ) -> Self {
    Self {
      customer_name,
      invoice_number,
      total_amount,
      payment_status,
      date_created: Utc::now(),
      files,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFileRef {
  pub file_name: FileName,
  pub file_path: FilePath,
}

impl NewFileRef {
  pub fn new(file_name: FileName, file_path: FilePath) -> Self {
    Self {
      file_name,
      file_path,
    }
  }

  pub fn attach(self, id: i64, invoice_id: i64) -> FileRef {
    FileRef {
      id,
      invoice_id,
      file_name: self.file_name,
      file_path: self.file_path,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn new_file(name: &str, path: &str) -> NewFileRef {
    NewFileRef::new(
      FileName::new(name.to_string()).unwrap(),
      FilePath::new(path.to_string()).unwrap(),
    )
  }

  #[test]
  fn test_new_invoice_stamps_creation_time() {
    let before = Utc::now();
    let invoice = NewInvoice::new(
      CustomerName::new("Acme".to_string()).unwrap(),
      InvoiceNumber::new("INV-001".to_string()).unwrap(),
      TotalAmount::new(dec!(100)),
      PaymentStatus::new("unpaid".to_string()).unwrap(),
      vec![new_file("a.pdf", "/files/a.pdf")],
    );
    let after = Utc::now();

    assert!(invoice.date_created >= before && invoice.date_created <= after);
    assert_eq!(invoice.files.len(), 1);
  }

  #[test]
  fn test_attach_links_file_to_invoice() {
    let file = new_file("a.pdf", "/files/a.pdf").attach(7, 3);
    assert_eq!(file.id, 7);
    assert_eq!(file.invoice_id, 3);
    assert_eq!(file.file_name.value(), "a.pdf");
    assert_eq!(file.file_path.value(), "/files/a.pdf");
  }

  #[test]
  fn test_has_status_is_exact() {
    let invoice = Invoice {
      id: 1,
      customer_name: CustomerName::new("Acme".to_string()).unwrap(),
      invoice_number: InvoiceNumber::new("1".to_string()).unwrap(),
      total_amount: TotalAmount::new(dec!(1)),
      payment_status: PaymentStatus::new("paid".to_string()).unwrap(),
      date_created: Utc::now(),
      files: vec![],
    };
    assert!(invoice.has_status("paid"));
    assert!(!invoice.has_status("Paid"));
    assert_eq!(invoice.file_count(), 0);
  }
}
