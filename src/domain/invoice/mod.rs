pub mod entities;
pub mod errors;
pub mod filter;
pub mod ports;
pub mod services;
pub mod update_policy;
pub mod value_objects;

pub use entities::{FileRef, Invoice, NewFileRef, NewInvoice};
pub use errors::InvoiceError;
pub use filter::{InvoiceFilter, InvoicePredicate};
pub use ports::InvoiceRepository;
pub use services::{InvoiceData, InvoiceService};
pub use update_policy::{FileChange, InvoicePatch, UpdatePlan, UpdatePolicy};
pub use value_objects::{
  CustomerName, FileName, FilePath, InvoiceNumber, PaymentStatus, TotalAmount, ValueObjectError,
};
