//! Application layer
//!
//! Use cases translate raw commands into domain values, call the invoice
//! service and hand back wire-ready DTOs.

pub mod invoice;
