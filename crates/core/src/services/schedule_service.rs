use chrono::{Days, Months, NaiveDate};

use crate::models::cadence::Cadence;

/// Build the purchase schedule for `[start, end]` (both inclusive).
///
/// The first entry is always `start`; entries are strictly increasing and
/// never pass `end`. An inverted range yields an empty schedule.
///
/// Monthly steps are counted from `start` rather than from the previous
/// entry, and clamp to the last day of shorter months: a Jan 31 start gives
/// Feb 29 (or 28), Mar 31, Apr 30, ... so the anchor day is never lost.
pub fn generate_schedule(start: NaiveDate, end: NaiveDate, cadence: Cadence) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut step: u32 = 0;

    while let Some(date) = nth_purchase(start, cadence, step) {
        if date > end {
            break;
        }
        dates.push(date);
        step += 1;
    }

    tracing::debug!(
        "Generated {} {} purchase dates between {} and {}",
        dates.len(),
        cadence,
        start,
        end
    );
    dates
}

/// Date of the `n`-th purchase (0-based), or `None` past chrono's range.
fn nth_purchase(start: NaiveDate, cadence: Cadence, n: u32) -> Option<NaiveDate> {
    match cadence.step_days() {
        Some(days) => start.checked_add_days(Days::new(days * u64::from(n))),
        None => start.checked_add_months(Months::new(n)),
    }
}
