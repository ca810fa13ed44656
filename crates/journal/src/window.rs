use chrono::{Days, NaiveDate};

use crate::schema::Entry;

/// Default length of the trailing report window.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Entries dated exactly `reference`, in log order.
pub fn today(entries: &[Entry], reference: NaiveDate) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.date == reference)
        .cloned()
        .collect()
}

/// First date of a `days`-long trailing window ending at `reference`.
///
/// Windows reaching past the earliest representable date start there.
pub fn window_start(reference: NaiveDate, days: i64) -> NaiveDate {
    reference
        .checked_sub_days(Days::new(days.max(0).unsigned_abs()))
        .unwrap_or(NaiveDate::MIN)
}

/// Entries dated within `[reference - days, reference]`, both ends
/// inclusive, in log order.
pub fn trailing_window(entries: &[Entry], reference: NaiveDate, days: i64) -> Vec<Entry> {
    let start = window_start(reference, days);
    entries
        .iter()
        .filter(|entry| entry.date >= start && entry.date <= reference)
        .cloned()
        .collect()
}
