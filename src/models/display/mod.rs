// Display state snapshot

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

/// Everything the clock screen shows for one tick.
#[derive(Debug, Clone)]
pub struct DisplayState {
    pub current_date: NaiveDate,
    pub current_time: NaiveTime,
    /// Relative asset path of the background. Always a resolvable string
    /// (the default sentinel when no holiday applies). Shared so ticks that
    /// keep the same date keep the same allocation.
    pub background_path: Arc<str>,
}
