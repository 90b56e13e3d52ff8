use chrono::{Days, NaiveDate};

use crate::models::price::PriceSeries;

const START_PRICE: f64 = 30_000.0;
const PRICE_FLOOR: f64 = 10_000.0;

/// Deterministic demo price series covering `[start, end]`, one entry per day.
///
/// Used when no provider can deliver real prices, so the dashboard still
/// shows a plausible curve: a slow sine-shaped oscillation on a small
/// upward drift, never below 10 000. Empty for an inverted range.
pub fn synthetic_price_series(start: NaiveDate, end: NaiveDate) -> PriceSeries {
    let mut series = PriceSeries::new();
    let mut price = START_PRICE;
    let mut day: u64 = 0;

    while let Some(date) = start.checked_add_days(Days::new(day)) {
        if date > end {
            break;
        }
        let i = day as f64;
        price = (price * (1.0 + ((i / 20.0).sin() * 0.01 + 0.0005))).max(PRICE_FLOOR);
        series.insert(date, price);
        day += 1;
    }

    series
}
