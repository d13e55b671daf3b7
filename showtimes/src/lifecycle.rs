//! Status transitions.
//!
//! Two rules decide when a showtime is "over" and they are deliberately not
//! the same:
//!
//! - the expiry sweep ([`hide_expired`]) hides a scheduled showtime once its
//!   **start** instant is in the past;
//! - the `expired` filter category matches once the **end** instant is in the
//!   past.
//!
//! A showtime that has started but not ended is therefore swept yet not
//! listed as expired.

use crate::types::{Showtime, ShowtimeId, ShowtimeStatus};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

/// Outcome of an expiry sweep
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Showtimes moved from `Scheduled` to `Hidden`
    pub hidden_ids: BTreeSet<ShowtimeId>,
}

impl SweepReport {
    /// Number of showtimes hidden
    #[must_use]
    pub fn len(&self) -> usize {
        self.hidden_ids.len()
    }

    /// Whether the sweep changed nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hidden_ids.is_empty()
    }
}

/// Whether the sweep would hide this showtime at local time `now`
#[must_use]
pub fn is_sweepable(showtime: &Showtime, now: NaiveDateTime) -> bool {
    showtime.status == ShowtimeStatus::Scheduled && showtime.starts_at() < now
}

/// Ids the sweep would hide, without changing anything
#[must_use]
pub fn expired_for_sweep(showtimes: &[Showtime], now: NaiveDateTime) -> BTreeSet<ShowtimeId> {
    showtimes
        .iter()
        .filter(|showtime| is_sweepable(showtime, now))
        .map(|showtime| showtime.id)
        .collect()
}

/// Hides every scheduled showtime that started before `now`
///
/// Hidden and future showtimes are left untouched.
pub fn hide_expired(showtimes: &mut [Showtime], now: NaiveDateTime) -> SweepReport {
    let mut report = SweepReport::default();
    for showtime in showtimes.iter_mut().filter(|s| is_sweepable(s, now)) {
        showtime.status = ShowtimeStatus::Hidden;
        report.hidden_ids.insert(showtime.id);
    }
    report
}

/// Sets the status of the showtime with `id`, returning whether it was found
pub fn apply_status(showtimes: &mut [Showtime], id: ShowtimeId, status: ShowtimeStatus) -> bool {
    match showtimes.iter_mut().find(|showtime| showtime.id == id) {
        Some(showtime) => {
            showtime.status = status;
            true
        }
        None => false,
    }
}
