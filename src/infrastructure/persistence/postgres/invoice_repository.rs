use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};
use std::collections::HashMap;

use crate::domain::invoice::{
  CustomerName, FileChange, FileName, FilePath, FileRef, Invoice, InvoiceError, InvoiceFilter,
  InvoiceNumber, InvoicePatch, InvoiceRepository, NewFileRef, NewInvoice, PaymentStatus,
  TotalAmount, UpdatePolicy,
};

const INVOICE_COLUMNS: &str =
  "id, customer_name, invoice_number, total_amount, payment_status, date_created";

#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: i64,
  customer_name: String,
  invoice_number: String,
  total_amount: Decimal,
  payment_status: String,
  date_created: DateTime<Utc>,
}

impl InvoiceRow {
  fn into_invoice(self, files: Vec<FileRef>) -> Result<Invoice, InvoiceError> {
    Ok(Invoice {
      id: self.id,
      customer_name: CustomerName::new(self.customer_name)?,
      invoice_number: InvoiceNumber::new(self.invoice_number)?,
      total_amount: TotalAmount::new(self.total_amount),
      payment_status: PaymentStatus::new(self.payment_status)?,
      date_created: self.date_created,
      files,
    })
  }
}

#[derive(Debug, FromRow)]
struct FileRow {
  id: i64,
  invoice_id: i64,
  file_name: String,
  file_path: String,
}

impl TryFrom<FileRow> for FileRef {
  type Error = InvoiceError;

  fn try_from(row: FileRow) -> Result<Self, Self::Error> {
    Ok(FileRef {
      id: row.id,
      invoice_id: row.invoice_id,
      file_name: FileName::new(row.file_name)?,
      file_path: FilePath::new(row.file_path)?,
    })
  }
}

pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Attaches file rows to their invoices, keeping the invoice order.
  async fn hydrate(
    conn: &mut PgConnection,
    rows: Vec<InvoiceRow>,
  ) -> Result<Vec<Invoice>, InvoiceError> {
    if rows.is_empty() {
      return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let file_rows = sqlx::query_as::<_, FileRow>(
      r#"
            SELECT id, invoice_id, file_name, file_path
            FROM invoice_files
            WHERE invoice_id = ANY($1)
            ORDER BY id
            "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut files_by_invoice: HashMap<i64, Vec<FileRef>> = HashMap::new();
    for file_row in file_rows {
      let file = FileRef::try_from(file_row)?;
      files_by_invoice
        .entry(file.invoice_id)
        .or_default()
        .push(file);
    }

    rows
      .into_iter()
      .map(|row| {
        let files = files_by_invoice.remove(&row.id).unwrap_or_default();
        row.into_invoice(files)
      })
      .collect()
  }

  async fn insert_files(
    conn: &mut PgConnection,
    invoice_id: i64,
    files: Vec<NewFileRef>,
  ) -> Result<(), InvoiceError> {
    for file in files {
      sqlx::query(
        r#"
            INSERT INTO invoice_files (invoice_id, file_name, file_path)
            VALUES ($1, $2, $3)
            "#,
      )
      .bind(invoice_id)
      .bind(file.file_name.value())
      .bind(file.file_path.value())
      .execute(&mut *conn)
      .await?;
    }

    Ok(())
  }

  async fn load_one(conn: &mut PgConnection, id: i64) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {} FROM invoices WHERE id = $1",
      INVOICE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
      Some(row) => Ok(Self::hydrate(conn, vec![row]).await?.pop()),
      None => Ok(None),
    }
  }

  /// Reads and row-locks an invoice inside an open transaction.
  async fn lock_one(conn: &mut PgConnection, id: i64) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {} FROM invoices WHERE id = $1 FOR UPDATE",
      INVOICE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
      Some(row) => Ok(Self::hydrate(conn, vec![row]).await?.pop()),
      None => Ok(None),
    }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
    let mut tx = self.pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
      r#"
            INSERT INTO invoices (
                customer_name, invoice_number, total_amount, payment_status, date_created
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
    )
    .bind(invoice.customer_name.value())
    .bind(invoice.invoice_number.value())
    .bind(invoice.total_amount.value())
    .bind(invoice.payment_status.as_str())
    .bind(invoice.date_created)
    .fetch_one(&mut *tx)
    .await?;

    Self::insert_files(&mut tx, id, invoice.files).await?;

    let created = Self::load_one(&mut tx, id)
      .await?
      .ok_or_else(|| InvoiceError::Repository(format!("Invoice {} vanished after insert", id)))?;

    tx.commit().await?;
    Ok(created)
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let mut conn = self.pool.acquire().await?;

    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      "SELECT {} FROM invoices ORDER BY id",
      INVOICE_COLUMNS
    ))
    .fetch_all(&mut *conn)
    .await?;

    Self::hydrate(&mut conn, rows).await
  }

  async fn find_by_id(&self, id: i64) -> Result<Option<Invoice>, InvoiceError> {
    let mut conn = self.pool.acquire().await?;
    Self::load_one(&mut conn, id).await
  }

  async fn find_filtered(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, InvoiceError> {
    let predicate = filter.predicate();
    let mut conn = self.pool.acquire().await?;

    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
      r#"
            SELECT {}
            FROM invoices
            WHERE ($1::timestamptz IS NULL OR date_created >= $1)
              AND ($2::timestamptz IS NULL OR date_created < $2)
              AND ($3::varchar IS NULL OR payment_status = $3)
            ORDER BY id
            "#,
      INVOICE_COLUMNS
    ))
    .bind(predicate.created_from())
    .bind(predicate.created_before())
    .bind(predicate.payment_status())
    .fetch_all(&mut *conn)
    .await?;

    Self::hydrate(&mut conn, rows).await
  }

  async fn update(&self, id: i64, patch: InvoicePatch) -> Result<Option<Invoice>, InvoiceError> {
    let mut tx = self.pool.begin().await?;

    let Some(existing) = Self::lock_one(&mut tx, id).await? else {
      tx.rollback().await?;
      return Ok(None);
    };

    let plan = UpdatePolicy::plan(&existing, patch);

    sqlx::query(
      r#"
            UPDATE invoices
            SET customer_name = $2, invoice_number = $3, total_amount = $4, payment_status = $5
            WHERE id = $1
            "#,
    )
    .bind(id)
    .bind(plan.customer_name.value())
    .bind(plan.invoice_number.value())
    .bind(plan.total_amount.value())
    .bind(plan.payment_status.as_str())
    .execute(&mut *tx)
    .await?;

    if let FileChange::Replace(files) = plan.files {
      sqlx::query("DELETE FROM invoice_files WHERE invoice_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

      Self::insert_files(&mut tx, id, files).await?;
    }

    let updated = Self::load_one(&mut tx, id).await?;
    tx.commit().await?;

    Ok(updated)
  }

  async fn delete(&self, id: i64) -> Result<Option<Invoice>, InvoiceError> {
    let mut tx = self.pool.begin().await?;

    let Some(existing) = Self::lock_one(&mut tx, id).await? else {
      tx.rollback().await?;
      return Ok(None);
    };

    sqlx::query("DELETE FROM invoice_files WHERE invoice_id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await?;

    sqlx::query("DELETE FROM invoices WHERE id = $1")
      .bind(id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    Ok(Some(existing))
  }
}
