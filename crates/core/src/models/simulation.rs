use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::cadence::Cadence;

/// Cumulative position right after one scheduled purchase.
///
/// Valued at the purchase day's own price, so the curve is historically
/// accurate per period rather than re-marked against today's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Purchase date
    pub date: NaiveDate,

    /// Total fiat invested up to and including this purchase
    pub invested_cumulative: f64,

    /// Total units of the asset held after this purchase
    pub units_cumulative: f64,

    /// `units_cumulative × price`
    pub value: f64,

    /// Asset price on `date`
    pub price: f64,
}

/// Final figures of a DCA run, taken from the last timeline point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DcaSummary {
    pub total_invested: f64,
    pub total_units: f64,
    pub current_value: f64,

    /// `current_value - total_invested`
    pub profit_and_loss: f64,

    /// Percentage return; 0 when nothing was invested
    pub profit_and_loss_pct: f64,

    pub latest_price: f64,
}

impl DcaSummary {
    /// Summary of a single point; `Default` covers the empty timeline.
    pub fn from_point(point: &TimelinePoint) -> Self {
        let profit_and_loss = point.value - point.invested_cumulative;
        let profit_and_loss_pct = if point.invested_cumulative != 0.0 {
            (profit_and_loss / point.invested_cumulative) * 100.0
        } else {
            0.0
        };
        Self {
            total_invested: point.invested_cumulative,
            total_units: point.units_cumulative,
            current_value: point.value,
            profit_and_loss,
            profit_and_loss_pct,
            latest_price: point.price,
        }
    }
}

/// Output of the simulator: the full timeline plus its summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DcaResult {
    pub timeline: Vec<TimelinePoint>,
    pub summary: DcaSummary,
}

/// Where the prices behind a report came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    /// Fetched from the named provider
    Live(String),
    /// Every provider failed; generated demo series
    Synthetic,
    /// Supplied directly by the caller
    Provided,
    /// No purchase dates, so nothing was fetched
    Unused,
}

impl std::fmt::Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceSource::Live(name) => write!(f, "{name}"),
            PriceSource::Synthetic => write!(f, "synthetic"),
            PriceSource::Provided => write!(f, "provided"),
            PriceSource::Unused => write!(f, "unused"),
        }
    }
}

/// A simulation together with the inputs that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcaReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cadence: Cadence,
    pub amount_per_purchase: f64,

    /// Every scheduled purchase date, including ones skipped for lack of a price
    pub schedule: Vec<NaiveDate>,

    pub price_source: PriceSource,
    pub result: DcaResult,
}

impl DcaReport {
    /// Number of scheduled dates that had no price and were skipped.
    pub fn skipped_purchases(&self) -> usize {
        self.schedule.len().saturating_sub(self.result.timeline.len())
    }
}
