use chrono::NaiveDate;

use crate::models::price::PriceSeries;
use crate::models::simulation::{DcaResult, DcaSummary, TimelinePoint};

/// Value a fixed-amount purchase on every scheduled date.
///
/// Dates without a price are skipped: no purchase, no timeline entry.
/// Each point is marked at its own day's price. The summary is taken from
/// the last point, or is all zeros when nothing was bought.
///
/// The amount is not validated here; use `DcaRequest` at the boundary.
pub fn simulate(schedule: &[NaiveDate], prices: &PriceSeries, amount_per_purchase: f64) -> DcaResult {
    let mut timeline = Vec::with_capacity(schedule.len());
    let mut units_cumulative = 0.0;
    let mut invested_cumulative = 0.0;

    for &date in schedule {
        let Some(price) = prices.get(date) else {
            continue;
        };
        units_cumulative += amount_per_purchase / price;
        invested_cumulative += amount_per_purchase;
        timeline.push(TimelinePoint {
            date,
            invested_cumulative,
            units_cumulative,
            value: units_cumulative * price,
            price,
        });
    }

    if timeline.len() < schedule.len() {
        tracing::debug!(
            "Skipped {} of {} scheduled purchases with no price",
            schedule.len() - timeline.len(),
            schedule.len()
        );
    }

    let summary = timeline.last().map(DcaSummary::from_point).unwrap_or_default();
    DcaResult { timeline, summary }
}

/// Render a timeline as CSV.
/// Columns: date, invested, units, value, price
pub fn timeline_to_csv(timeline: &[TimelinePoint]) -> String {
    let mut csv = String::from("date,invested,units,value,price\n");
    for point in timeline {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            point.date, point.invested_cumulative, point.units_cumulative, point.value, point.price,
        ));
    }
    csv
}
