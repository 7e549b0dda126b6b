//! In-process invoice store for development and tests

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::invoice::{
  Invoice, InvoiceError, InvoiceFilter, InvoicePatch, InvoiceRepository, NewInvoice, UpdatePolicy,
};

#[derive(Debug, Default)]
struct State {
  invoices: BTreeMap<i64, Invoice>,
  last_invoice_id: i64,
  last_file_id: i64,
}

impl State {
  fn next_invoice_id(&mut self) -> i64 {
    self.last_invoice_id += 1;
    self.last_invoice_id
  }

  fn next_file_id(&mut self) -> i64 {
    self.last_file_id += 1;
    self.last_file_id
  }
}

/// Uses a single RwLock so that every operation, including the file
/// replacement on update, is applied as one unit.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceRepository {
  state: Arc<RwLock<State>>,
}

impl InMemoryInvoiceRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
    let mut state = self.state.write().await;
    let id = state.next_invoice_id();

    let files = invoice
      .files
      .into_iter()
      .map(|file| {
        let file_id = state.next_file_id();
        file.attach(file_id, id)
      })
      .collect();

    let created = Invoice {
      id,
      customer_name: invoice.customer_name,
      invoice_number: invoice.invoice_number,
      total_amount: invoice.total_amount,
      payment_status: invoice.payment_status,
      date_created: invoice.date_created,
      files,
    };

    state.invoices.insert(id, created.clone());
    Ok(created)
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let state = self.state.read().await;
    Ok(state.invoices.values().cloned().collect())
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, InvoiceError> {
    let state = self.state.read().await;
    Ok(state.invoices.get(&id).cloned())
  }

  async fn find_filtered(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, InvoiceError> {
    let predicate = filter.predicate();
    let state = self.state.read().await;

    Ok(
      state
        .invoices
        .values()
        .filter(|invoice| predicate.matches(invoice))
        .cloned()
        .collect(),
    )
  }

  async fn update(&self, id: i64, patch: InvoicePatch) -> Result<Option<Invoice>, InvoiceError> {
    let mut guard = self.state.write().await;
    let state = &mut *guard;

    let Some(invoice) = state.invoices.get_mut(&id) else {
      return Ok(None);
    };

    let plan = UpdatePolicy::plan(invoice, patch);
    let last_file_id = &mut state.last_file_id;
    plan.apply_to(invoice, || {
      *last_file_id += 1;
      *last_file_id
    });

    Ok(Some(invoice.clone()))
  }

  async fn delete(&self, id: i64) -> Result<Option<Invoice>, InvoiceError> {
    let mut state = self.state.write().await;
    Ok(state.invoices.remove(&id))
  }
}
