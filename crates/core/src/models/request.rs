use chrono::NaiveDate;
use serde::Serialize;

use super::cadence::Cadence;
use crate::errors::CoreError;

/// Parse a calendar date in ISO-8601 form (`YYYY-MM-DD`).
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CoreError::InvalidDate(s.to_string()))
}

/// A validated simulation request.
///
/// Construction is the only place caller input is checked: the amount must
/// be finite and positive, and the range may not exceed `max_range_days`.
/// `start > end` is accepted and simply produces no purchases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DcaRequest {
    start: NaiveDate,
    end: NaiveDate,
    cadence: Cadence,
    amount_per_purchase: f64,
}

impl DcaRequest {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        cadence: Cadence,
        amount_per_purchase: f64,
        max_range_days: i64,
    ) -> Result<Self, CoreError> {
        if !amount_per_purchase.is_finite() || amount_per_purchase <= 0.0 {
            return Err(CoreError::InvalidAmount(amount_per_purchase));
        }
        let range_days = (end - start).num_days();
        if range_days > max_range_days {
            return Err(CoreError::ValidationError(format!(
                "Range of {range_days} days exceeds maximum of {max_range_days} days"
            )));
        }
        Ok(Self {
            start,
            end,
            cadence,
            amount_per_purchase,
        })
    }

    /// Build a request from raw form values.
    pub fn parse(
        start: &str,
        end: &str,
        cadence: &str,
        amount_per_purchase: f64,
        max_range_days: i64,
    ) -> Result<Self, CoreError> {
        let start = parse_iso_date(start)?;
        let end = parse_iso_date(end)?;
        let cadence: Cadence = cadence.parse()?;
        Self::new(start, end, cadence, amount_per_purchase, max_range_days)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn amount_per_purchase(&self) -> f64 {
        self.amount_per_purchase
    }

    /// Inclusive length of the range in days; 0 when `start > end`.
    pub fn range_days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}
