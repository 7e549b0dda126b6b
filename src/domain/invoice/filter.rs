//! Listing criteria and the predicate they compile into.
//!
//! Criteria are conjunctive and only present criteria constrain the result;
//! an empty filter matches every invoice. Date bounds are whole UTC calendar
//! days on both ends, so `end_date` includes everything created on that day.
//! Status matching is exact and case-sensitive.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use super::entities::Invoice;
use super::value_objects::PaymentStatus;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub payment_status: Option<PaymentStatus>,
}

impl InvoiceFilter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_start_date(mut self, date: NaiveDate) -> Self {
    self.start_date = Some(date);
    self
  }

  pub fn with_end_date(mut self, date: NaiveDate) -> Self {
    self.end_date = Some(date);
    self
  }

  pub fn with_payment_status(mut self, status: PaymentStatus) -> Self {
    self.payment_status = Some(status);
    self
  }

  pub fn is_empty(&self) -> bool {
    self.start_date.is_none() && self.end_date.is_none() && self.payment_status.is_none()
  }

  /// Builds the predicate for these criteria.
  pub fn predicate(&self) -> InvoicePredicate {
    InvoicePredicate {
      created_from: self.start_date.map(start_of_day),
      created_before: self
        .end_date
        .map(|date| date.checked_add_days(Days::new(1)).map(start_of_day)),
      payment_status: self.payment_status.as_ref().map(|s| s.as_str().to_string()),
    }
  }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
  date.and_time(NaiveTime::MIN).and_utc()
}

/// Half-open creation window `[created_from, created_before)` plus an
/// optional exact status.
///
/// `created_before` is `Some(None)` when the end date is the last
/// representable day, which leaves the window open above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicePredicate {
  created_from: Option<DateTime<Utc>>,
  created_before: Option<Option<DateTime<Utc>>>,
  payment_status: Option<String>,
}

impl InvoicePredicate {
  pub fn created_from(&self) -> Option<DateTime<Utc>> {
    self.created_from
  }

  pub fn created_before(&self) -> Option<DateTime<Utc>> {
    self.created_before.flatten()
  }

  pub fn payment_status(&self) -> Option<&str> {
    self.payment_status.as_deref()
  }

  pub fn matches(&self, invoice: &Invoice) -> bool {
    self
      .created_from
      .is_none_or(|from| invoice.date_created >= from)
      && self
        .created_before()
        .is_none_or(|before| invoice.date_created < before)
      && self
        .payment_status
        .as_deref()
        .is_none_or(|status| invoice.has_status(status))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::{CustomerName, InvoiceNumber, TotalAmount};
  use chrono::TimeZone;
  use rust_decimal_macros::dec;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn invoice_at(id: i64, created: DateTime<Utc>, status: &str) -> Invoice {
    Invoice {
      id,
      customer_name: CustomerName::new("Acme".to_string()).unwrap(),
      invoice_number: InvoiceNumber::new(format!("INV-{}", id)).unwrap(),
      total_amount: TotalAmount::new(dec!(10)),
      payment_status: PaymentStatus::new(status.to_string()).unwrap(),
      date_created: created,
      files: vec![],
    }
  }

  fn fixtures() -> Vec<Invoice> {
    vec![
      invoice_at(1, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), "unpaid"),
      invoice_at(2, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(), "paid"),
      invoice_at(3, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(), "paid"),
    ]
  }

  fn matching_ids(filter: &InvoiceFilter) -> Vec<i64> {
    let predicate = filter.predicate();
    fixtures()
      .into_iter()
      .filter(|i| predicate.matches(i))
      .map(|i| i.id)
      .collect()
  }

  #[test]
  fn test_empty_filter_matches_everything() {
    let filter = InvoiceFilter::new();
    assert!(filter.is_empty());
    assert_eq!(matching_ids(&filter), vec![1, 2, 3]);
  }

  #[test]
  fn test_start_date_and_status_compose() {
    let filter = InvoiceFilter::new()
      .with_start_date(date(2024, 1, 15))
      .with_payment_status(PaymentStatus::new("paid".to_string()).unwrap());
    assert_eq!(matching_ids(&filter), vec![2, 3]);
  }

  #[test]
  fn test_range_is_inclusive_on_both_ends() {
    let filter = InvoiceFilter::new()
      .with_start_date(date(2024, 2, 1))
      .with_end_date(date(2024, 3, 1));
    assert_eq!(matching_ids(&filter), vec![2, 3]);
  }

  #[test]
  fn test_end_date_covers_the_whole_day() {
    let late = invoice_at(
      9,
      Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap(),
      "paid",
    );
    let next_day = invoice_at(10, Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(), "paid");
    let predicate = InvoiceFilter::new().with_end_date(date(2024, 3, 1)).predicate();

    assert!(predicate.matches(&late));
    assert!(!predicate.matches(&next_day));
  }

  #[test]
  fn test_status_match_is_case_sensitive() {
    let filter =
      InvoiceFilter::new().with_payment_status(PaymentStatus::new("Paid".to_string()).unwrap());
    assert!(matching_ids(&filter).is_empty());
  }

  #[test]
  fn test_inverted_range_matches_nothing() {
    let filter = InvoiceFilter::new()
      .with_start_date(date(2024, 3, 1))
      .with_end_date(date(2024, 1, 1));
    assert!(matching_ids(&filter).is_empty());
  }

  #[test]
  fn test_predicate_bounds() {
    let predicate = InvoiceFilter::new()
      .with_start_date(date(2024, 1, 15))
      .with_end_date(date(2024, 1, 31))
      .predicate();

    assert_eq!(
      predicate.created_from(),
      Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
    );
    assert_eq!(
      predicate.created_before(),
      Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(predicate.payment_status(), None);
  }
}
