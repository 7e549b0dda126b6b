pub mod create_invoice;
pub mod delete_invoice;
pub mod filter_invoices;
pub mod get_invoice;
pub mod invoice_dto;
pub mod list_invoices;
pub mod update_invoice;

pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceUseCase};
pub use delete_invoice::{DeleteInvoiceCommand, DeleteInvoiceUseCase};
pub use filter_invoices::{FilterInvoicesCommand, FilterInvoicesUseCase};
pub use get_invoice::{GetInvoiceCommand, GetInvoiceUseCase};
pub use invoice_dto::{FileInput, FileRefDto, InvoiceDto};
pub use list_invoices::ListInvoicesUseCase;
pub use update_invoice::{UpdateInvoiceCommand, UpdateInvoiceUseCase};
