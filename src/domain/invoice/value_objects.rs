use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TEXT_LENGTH: usize = 255;
const MAX_FILE_PATH_LENGTH: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid customer name: {0}")]
  InvalidCustomerName(String),
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid payment status: {0}")]
  InvalidPaymentStatus(String),
  #[error("Invalid file name: {0}")]
  InvalidFileName(String),
  #[error("Invalid file path: {0}")]
  InvalidFilePath(String),
}

/// Checks that a text value has visible content and fits the column.
///
/// The value itself is kept as supplied; only blank-ness is judged on the
/// trimmed form.
fn check_text(
  value: &str,
  max_len: usize,
  field: &str,
  err: fn(String) -> ValueObjectError,
) -> Result<(), ValueObjectError> {
  if value.trim().is_empty() {
    return Err(err(format!("{} cannot be empty", field)));
  }
  if value.chars().count() > max_len {
    return Err(err(format!(
      "{} cannot exceed {} characters",
      field, max_len
    )));
  }
  Ok(())
}

// Customer Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerName(String);

impl CustomerName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    check_text(
      &value,
      MAX_TEXT_LENGTH,
      "Customer name",
      ValueObjectError::InvalidCustomerName,
    )?;
    Ok(Self(value))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for CustomerName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Invoice Number - free text, duplicates allowed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    check_text(
      &value,
      MAX_TEXT_LENGTH,
      "Invoice number",
      ValueObjectError::InvalidInvoiceNumber,
    )?;
    Ok(Self(value))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Payment status label.
///
/// This is an opaque caller-supplied category ("paid" and "unpaid" by
/// convention). There is no transition table; any non-blank label is accepted
/// and compared byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentStatus(String);

impl PaymentStatus {
  pub const PAID: &'static str = "paid";
  pub const UNPAID: &'static str = "unpaid";

  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    check_text(
      &value,
      MAX_TEXT_LENGTH,
      "Payment status",
      ValueObjectError::InvalidPaymentStatus,
    )?;
    Ok(Self(value))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for PaymentStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Total Amount - any sign, any precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalAmount(Decimal);

impl TotalAmount {
  pub fn new(value: Decimal) -> Self {
    Self(value)
  }

  /// Converts a wire number into an amount.
  ///
  /// The number must survive the trip through `Decimal` unchanged. Values
  /// beyond 28 significant digits or ~7.9e28 in magnitude are rejected
  /// rather than rounded.
  pub fn from_f64(value: f64) -> Result<Self, ValueObjectError> {
    if !value.is_finite() {
      return Err(ValueObjectError::InvalidAmount(format!(
        "Amount must be a finite number, got {}",
        value
      )));
    }

    let amount = Decimal::from_f64(value).ok_or_else(|| {
      ValueObjectError::InvalidAmount(format!("Amount {} is out of range", value))
    })?;

    if amount.to_f64() != Some(value) {
      return Err(ValueObjectError::InvalidAmount(format!(
        "Amount {:e} cannot be stored without losing precision",
        value
      )));
    }

    Ok(Self(amount))
  }

  pub fn value(&self) -> Decimal {
    self.0
  }

  pub fn to_f64(&self) -> f64 {
    self.0.to_f64().unwrap_or_default()
  }
}

impl fmt::Display for TotalAmount {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// File Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileName(String);

impl FileName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    check_text(
      &value,
      MAX_TEXT_LENGTH,
      "File name",
      ValueObjectError::InvalidFileName,
    )?;
    Ok(Self(value))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

// File Path - location or URL, opaque
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePath(String);

impl FilePath {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    check_text(
      &value,
      MAX_FILE_PATH_LENGTH,
      "File path",
      ValueObjectError::InvalidFilePath,
    )?;
    Ok(Self(value))
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}
