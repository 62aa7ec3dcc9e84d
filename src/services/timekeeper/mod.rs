//! Periodic display-state derivation.
//!
//! The screen ticks once per second. Holiday resolution (and, downstream,
//! image decoding) happens only when the calendar date rolls over, never on
//! every tick. Time is always taken in the configured zone, independent of
//! the host locale.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::models::display::DisplayState;
use crate::services::holiday::HolidayResolver;
use crate::utils::date::date_key;

/// Synchronous state behind the once-per-second tick. The driving timer
/// lives in the UI layer and stops with the window.
pub struct TimeKeeper {
    zone: Tz,
    last_checked_date: NaiveDate,
    state: DisplayState,
}

impl TimeKeeper {
    pub fn new(zone: Tz, resolver: &HolidayResolver) -> Self {
        Self::seeded_at(Utc::now().with_timezone(&zone), resolver)
    }

    /// Seeds the keeper from an explicit instant (the test seam).
    pub fn seeded_at(now: DateTime<Tz>, resolver: &HolidayResolver) -> Self {
        let date = now.date_naive();
        Self {
            zone: now.timezone(),
            last_checked_date: date,
            state: DisplayState {
                current_date: date,
                current_time: now.time(),
                background_path: resolver.resolve_background_path(&date_key(date)),
            },
        }
    }

    /// Advances the state to the current wall-clock instant.
    pub fn tick(&mut self, resolver: &HolidayResolver) -> &DisplayState {
        let now = Utc::now().with_timezone(&self.zone);
        self.tick_at(now, resolver)
    }

    /// Advances the state to `now`. On an unchanged date only the time is
    /// replaced and the background path keeps its allocation; on rollover
    /// the background is re-resolved once.
    pub fn tick_at(&mut self, now: DateTime<Tz>, resolver: &HolidayResolver) -> &DisplayState {
        let date = now.date_naive();
        let time = now.time();

        if date != self.last_checked_date {
            log::info!("date rolled over to {}, re-resolving background", date);
            self.last_checked_date = date;
            self.state = DisplayState {
                current_date: date,
                current_time: time,
                background_path: resolver.resolve_background_path(&date_key(date)),
            };
        } else {
            self.state.current_time = time;
        }

        &self.state
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    const TABLE: &str = r#"{ "05-09": "victory_day.png" }"#;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Tz> {
        chrono_tz::Europe::Moscow
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
    }

    #[test]
    fn same_date_tick_changes_only_the_time() {
        let resolver = HolidayResolver::from_json(TABLE);
        let mut keeper =
            TimeKeeper::seeded_at(at(2024, 5, 9, 10, 0, 0), &resolver);
        let before = keeper.state().clone();

        let after = keeper
            .tick_at(at(2024, 5, 9, 10, 0, 1), &resolver)
            .clone();

        assert_eq!(after.current_date, before.current_date);
        assert_ne!(after.current_time, before.current_time);
        assert!(Arc::ptr_eq(&after.background_path, &before.background_path));
    }

    #[test]
    fn date_rollover_re_resolves_the_background() {
        let resolver = HolidayResolver::from_json(TABLE);
        let mut keeper =
            TimeKeeper::seeded_at(at(2024, 5, 8, 23, 59, 59), &resolver);
        assert_eq!(
            keeper.state().background_path.as_ref(),
            crate::services::holiday::DEFAULT_BACKGROUND
        );

        let state = keeper.tick_at(at(2024, 5, 9, 0, 0, 0), &resolver);
        assert_eq!(state.background_path.as_ref(), "holidays/victory_day.png");
        assert_eq!(state.current_date, NaiveDate::from_ymd_opt(2024, 5, 9).unwrap());
    }

    #[test]
    fn rollover_off_a_holiday_returns_to_the_default() {
        let resolver = HolidayResolver::from_json(TABLE);
        let mut keeper =
            TimeKeeper::seeded_at(at(2024, 5, 9, 23, 59, 59), &resolver);

        let state = keeper.tick_at(at(2024, 5, 10, 0, 0, 0), &resolver);
        assert_eq!(
            state.background_path.as_ref(),
            crate::services::holiday::DEFAULT_BACKGROUND
        );
    }
}
