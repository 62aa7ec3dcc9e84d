// Date utility functions

use chrono::{Datelike, NaiveDate};

/// Formats a date as the zero-padded `MM-DD` key used by the holiday table.
/// The year is dropped on purpose: holidays recur annually.
pub fn date_key(date: NaiveDate) -> String {
    format!("{:02}-{:02}", date.month(), date.day())
}

/// Number of the day `current` falls on when counting from `anchor`.
/// The anchor date itself is day 1, not day 0.
pub fn days_since(anchor: NaiveDate, current: NaiveDate) -> i64 {
    (current - anchor).num_days() + 1
}
