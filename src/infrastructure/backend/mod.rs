//! HTTP client the web frontend uses to reach the invoice API

mod client;
mod payloads;

pub use client::{BackendClient, BackendError, BackendResponse};
pub use payloads::{FilePayload, InvoiceChanges, NewInvoicePayload};
