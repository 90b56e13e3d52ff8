use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single raw quote from a price feed (timestamp → price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Build a point from a unix timestamp in milliseconds.
    /// Returns `None` when the timestamp is out of chrono's range.
    pub fn from_millis(millis: i64, price: f64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|timestamp| Self { timestamp, price })
    }
}

/// Daily price mapping (calendar day → price) for a single asset.
///
/// Keys need not cover every day; gaps are expected and the simulator
/// skips dates it cannot find. Only finite, strictly positive prices are
/// ever stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    prices: BTreeMap<NaiveDate, f64>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce raw feed quotes to one entry per UTC calendar day.
    /// When several quotes fall on the same day, the last one wins.
    pub fn from_points(points: &[PricePoint]) -> Self {
        let mut series = Self::new();
        for point in points {
            series.insert(point.timestamp.date_naive(), point.price);
        }
        series
    }

    /// Insert or overwrite the price for `date`.
    /// Returns `false` (and stores nothing) for non-finite or non-positive prices.
    pub fn insert(&mut self, date: NaiveDate, price: f64) -> bool {
        if !price.is_finite() || price <= 0.0 {
            return false;
        }
        self.prices.insert(date, price);
        true
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.prices.get(&date).copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.prices.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next_back().copied()
    }

    /// Price on the most recent day in the series.
    pub fn latest_price(&self) -> Option<f64> {
        self.prices.values().next_back().copied()
    }

    /// Iterate in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.prices.iter().map(|(d, p)| (*d, *p))
    }
}

impl FromIterator<(NaiveDate, f64)> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (date, price) in iter {
            series.insert(date, price);
        }
        series
    }
}
