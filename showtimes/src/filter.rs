//! Showtime filtering.
//!
//! [`FilterEngine::filter`] ANDs three predicates (search, status, temporal
//! category) over a showtime collection. It is pure, total and order
//! preserving: the output is always a subsequence of the input.
//!
//! [`FilterCache`] memoizes the last result keyed by a hash of every input,
//! so re-deriving the board view after an unrelated action is free.

use crate::calendar::ScheduleCalendar;
use crate::text::{contains_normalized, normalize};
use crate::types::{DateFilter, Filters, ListingView, Showtime, ShowtimeStatus, StatusFilter};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// "Now" resolved into the cinema's local calendar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalNow {
    /// Local wall-clock time
    pub at: NaiveDateTime,
    /// Local calendar date
    pub today: NaiveDate,
}

/// Predicate composition over showtimes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FilterEngine {
    calendar: ScheduleCalendar,
}

impl FilterEngine {
    /// Creates an engine evaluating temporal categories in `calendar`
    #[must_use]
    pub const fn new(calendar: ScheduleCalendar) -> Self {
        Self { calendar }
    }

    /// Calendar used for temporal categories
    #[must_use]
    pub const fn calendar(&self) -> &ScheduleCalendar {
        &self.calendar
    }

    /// Resolves an instant into local time
    #[must_use]
    pub fn local_now(&self, now: DateTime<Utc>) -> LocalNow {
        let at = self.calendar.local(now);
        LocalNow {
            at,
            today: at.date(),
        }
    }

    /// Showtimes matching every filter, in their original order
    #[must_use]
    pub fn filter(
        &self,
        showtimes: &[Showtime],
        filters: &Filters,
        now: DateTime<Utc>,
    ) -> Vec<Showtime> {
        let local = self.local_now(now);
        let needle = normalize(&filters.search);

        showtimes
            .iter()
            .filter(|showtime| {
                matches_normalized_search(showtime, &needle)
                    && matches_status(showtime, filters.status_filter)
                    && self.matches_date(showtime, filters, local)
            })
            .cloned()
            .collect()
    }

    /// Whether a showtime falls in the filters' temporal category
    #[must_use]
    pub fn matches_date(&self, showtime: &Showtime, filters: &Filters, now: LocalNow) -> bool {
        let today = now.today;
        let date = showtime.show_date;

        match filters.date_filter {
            DateFilter::All => true,
            DateFilter::Today => date == today,
            DateFilter::Tomorrow => Some(date) == today.checked_add_days(Days::new(1)),
            DateFilter::ThisWeek => self.calendar.this_week(today).contains(date),
            DateFilter::NextWeek => self.calendar.next_week(today).contains(date),
            DateFilter::ThisMonth => self.calendar.this_month(today).contains(date),
            DateFilter::NextMonth => self.calendar.next_month(today).contains(date),
            DateFilter::Upcoming => date >= today,
            DateFilter::Past => date < today,
            DateFilter::Expired => showtime.ends_at() < now.at,
            DateFilter::Active => showtime.starts_at() <= now.at && now.at <= showtime.ends_at(),
            // No custom date picked yet: every showtime passes
            DateFilter::CustomDate => filters.custom_date.is_none_or(|custom| date == custom),
        }
    }
}

/// Whether the search term occurs in the room or movie name
///
/// An empty term matches everything. Both sides are compared after
/// [`normalize`].
#[must_use]
pub fn matches_search(showtime: &Showtime, search: &str) -> bool {
    search.is_empty() || display_names(showtime).any(|name| contains_normalized(name, search))
}

/// Same as [`matches_search`] with the term already normalized once per filter run
fn matches_normalized_search(showtime: &Showtime, needle: &str) -> bool {
    needle.is_empty() || display_names(showtime).any(|name| normalize(name).contains(needle))
}

fn display_names(showtime: &Showtime) -> impl Iterator<Item = &str> {
    [showtime.room_name.as_deref(), showtime.movie_name.as_deref()]
        .into_iter()
        .flatten()
}

/// Whether a showtime passes the status filter
#[must_use]
pub fn matches_status(showtime: &Showtime, status_filter: StatusFilter) -> bool {
    match status_filter {
        StatusFilter::All => true,
        StatusFilter::Scheduled => showtime.status == ShowtimeStatus::Scheduled,
        StatusFilter::Hidden => showtime.status == ShowtimeStatus::Hidden,
    }
}

/// Memoized filter result
///
/// Holds the output of the last `(showtimes, filters, view, now, engine)`
/// evaluation together with a 64-bit hash of those inputs.
#[derive(Clone, Debug, Default)]
pub struct FilterCache {
    key: Option<u64>,
    visible: Vec<Showtime>,
    hits: u64,
    misses: u64,
}

impl FilterCache {
    /// Empty cache
    #[must_use]
    pub const fn new() -> Self {
        Self {
            key: None,
            visible: Vec::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Filtered and lens-restricted showtimes, recomputed only when an input changed
    pub fn refresh(
        &mut self,
        engine: &FilterEngine,
        showtimes: &[Showtime],
        filters: &Filters,
        view: ListingView,
        now: DateTime<Utc>,
    ) -> &[Showtime] {
        let key = cache_key(engine, showtimes, filters, view, now);
        if self.key == Some(key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let mut visible = engine.filter(showtimes, filters, now);
            visible.retain(|showtime| view.admits(showtime));
            self.visible = visible;
            self.key = Some(key);
        }
        &self.visible
    }

    /// Result of the last refresh
    #[must_use]
    pub fn visible(&self) -> &[Showtime] {
        &self.visible
    }

    /// Forget the cached result
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// `(hits, misses)` since creation
    #[must_use]
    pub const fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

fn cache_key(
    engine: &FilterEngine,
    showtimes: &[Showtime],
    filters: &Filters,
    view: ListingView,
    now: DateTime<Utc>,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    engine.hash(&mut hasher);
    showtimes.hash(&mut hasher);
    filters.hash(&mut hasher);
    view.hash(&mut hasher);
    now.hash(&mut hasher);
    hasher.finish()
}
