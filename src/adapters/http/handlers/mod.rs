pub mod invoices;
pub mod invoices_web;
pub mod proxy;
