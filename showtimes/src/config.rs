//! Configuration for the showtime board.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::calendar::ScheduleCalendar;
use chrono::{FixedOffset, Weekday};
use serde::{Deserialize, Serialize};
use std::env;

/// Page size used when none (or zero) is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Board configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Showtimes per page (`SHOWTIME_PAGE_SIZE`, default 10)
    pub page_size: usize,
    /// First day of the week (`SHOWTIME_WEEK_START`, default Monday)
    pub week_start: Weekday,
    /// Cinema offset from UTC in minutes (`SHOWTIME_UTC_OFFSET_MINUTES`, default 0)
    pub utc_offset_minutes: i32,
    /// Capacity of the store's action broadcast (`SHOWTIME_BROADCAST_CAPACITY`, default 64)
    pub broadcast_capacity: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            week_start: Weekday::Mon,
            utc_offset_minutes: 0,
            broadcast_capacity: showtime_board_runtime::DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

impl BoardConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            page_size: lookup("SHOWTIME_PAGE_SIZE")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&size: &usize| size > 0)
                .unwrap_or(defaults.page_size),
            week_start: lookup("SHOWTIME_WEEK_START")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.week_start),
            utc_offset_minutes: lookup("SHOWTIME_UTC_OFFSET_MINUTES")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&minutes: &i32| {
                    FixedOffset::east_opt(minutes.saturating_mul(60)).is_some()
                })
                .unwrap_or(defaults.utc_offset_minutes),
            broadcast_capacity: lookup("SHOWTIME_BROADCAST_CAPACITY")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.broadcast_capacity),
        }
    }

    /// Calendar for the configured offset and week start
    #[must_use]
    pub fn calendar(&self) -> ScheduleCalendar {
        match FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)) {
            Some(offset) => ScheduleCalendar::new(offset, self.week_start),
            None => {
                tracing::warn!(
                    minutes = self.utc_offset_minutes,
                    "UTC offset out of range, using UTC"
                );
                ScheduleCalendar::utc(self.week_start)
            },
        }
    }
}
