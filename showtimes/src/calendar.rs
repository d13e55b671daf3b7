//! Local calendar used by the temporal categories.
//!
//! The clock reports UTC; showtimes are dated and timed in the cinema's local
//! wall-clock time. [`ScheduleCalendar`] converts between the two and knows
//! which weekday starts the week.

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveDateTime, Offset, Utc, Weekday,
};

/// An inclusive range of calendar dates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
    /// First date in the window
    pub start: NaiveDate,
    /// Last date in the window
    pub end: NaiveDate,
}

impl DateWindow {
    /// Whether `date` falls inside the window, both ends included
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Time zone and week convention of the cinema
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScheduleCalendar {
    offset: FixedOffset,
    week_start: Weekday,
}

impl Default for ScheduleCalendar {
    fn default() -> Self {
        Self::utc(Weekday::Mon)
    }
}

impl ScheduleCalendar {
    /// Calendar with the given UTC offset and first day of week
    #[must_use]
    pub const fn new(offset: FixedOffset, week_start: Weekday) -> Self {
        Self { offset, week_start }
    }

    /// Calendar running on UTC wall-clock time
    #[must_use]
    pub fn utc(week_start: Weekday) -> Self {
        Self::new(Utc.fix(), week_start)
    }

    /// First day of the week
    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Local wall-clock time for an instant
    #[must_use]
    pub fn local(&self, now: DateTime<Utc>) -> NaiveDateTime {
        now.with_timezone(&self.offset).naive_local()
    }

    /// Local calendar date for an instant
    #[must_use]
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local(now).date()
    }

    /// 1-based position of `date` in the configured week
    ///
    /// The first day of the week is 1, the last is 7.
    #[must_use]
    pub fn week_ordinal(&self, date: NaiveDate) -> u32 {
        let day = date.weekday().num_days_from_monday();
        let start = self.week_start.num_days_from_monday();
        (day + 7 - start) % 7 + 1
    }

    /// Window from `today` to the end of its week
    ///
    /// The upper bound is `today + (7 - ordinal)` days, so on the last day of
    /// the week the window is that single day.
    #[must_use]
    pub fn this_week(&self, today: NaiveDate) -> DateWindow {
        let remaining = 7 - self.week_ordinal(today);
        DateWindow {
            start: today,
            end: add_days(today, u64::from(remaining)),
        }
    }

    /// The seven days immediately after [`Self::this_week`]'s upper bound
    #[must_use]
    pub fn next_week(&self, today: NaiveDate) -> DateWindow {
        let this_week_end = self.this_week(today).end;
        DateWindow {
            start: add_days(this_week_end, 1),
            end: add_days(this_week_end, 7),
        }
    }

    /// First to last day of `today`'s month
    #[must_use]
    pub fn this_month(&self, today: NaiveDate) -> DateWindow {
        month_window(first_of_month(today))
    }

    /// First to last day of the month after `today`'s
    #[must_use]
    pub fn next_month(&self, today: NaiveDate) -> DateWindow {
        let first = first_of_month(today);
        month_window(first.checked_add_months(Months::new(1)).unwrap_or(first))
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_window(first: NaiveDate) -> DateWindow {
    let end = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    DateWindow { start: first, end }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code

    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn local_time_applies_offset() {
        let calendar = ScheduleCalendar::new(FixedOffset::east_opt(7 * 3600).unwrap(), Weekday::Mon);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();
        assert_eq!(calendar.today(now), date(2024, 6, 2));
        assert_eq!(calendar.local(now).to_string(), "2024-06-02 03:00:00");
    }

    #[test]
    fn week_ordinal_follows_week_start() {
        let monday_first = ScheduleCalendar::utc(Weekday::Mon);
        let sunday_first = ScheduleCalendar::utc(Weekday::Sun);
        // 2024-06-02 is a Sunday
        assert_eq!(monday_first.week_ordinal(date(2024, 6, 2)), 7);
        assert_eq!(sunday_first.week_ordinal(date(2024, 6, 2)), 1);
    }

    #[test]
    fn this_week_runs_to_end_of_week() {
        let calendar = ScheduleCalendar::utc(Weekday::Mon);
        // Wednesday 2024-05-29
        let window = calendar.this_week(date(2024, 5, 29));
        assert_eq!(window.start, date(2024, 5, 29));
        assert_eq!(window.end, date(2024, 6, 2));
    }

    #[test]
    fn this_week_collapses_on_last_day_of_week() {
        let calendar = ScheduleCalendar::utc(Weekday::Mon);
        let sunday = date(2024, 6, 2);
        let window = calendar.this_week(sunday);
        assert_eq!(window, DateWindow { start: sunday, end: sunday });
    }

    #[test]
    fn next_week_follows_this_week_bound() {
        let calendar = ScheduleCalendar::utc(Weekday::Mon);
        let window = calendar.next_week(date(2024, 5, 29));
        assert_eq!(window.start, date(2024, 6, 3));
        assert_eq!(window.end, date(2024, 6, 9));
    }

    #[test]
    fn month_windows_roll_over_the_year() {
        let calendar = ScheduleCalendar::default();
        let today = date(2024, 12, 15);
        assert_eq!(
            calendar.this_month(today),
            DateWindow { start: date(2024, 12, 1), end: date(2024, 12, 31) }
        );
        assert_eq!(
            calendar.next_month(today),
            DateWindow { start: date(2025, 1, 1), end: date(2025, 1, 31) }
        );
    }

    #[test]
    fn february_window_respects_leap_years() {
        let calendar = ScheduleCalendar::default();
        assert_eq!(calendar.next_month(date(2024, 1, 31)).end, date(2024, 2, 29));
    }
}
