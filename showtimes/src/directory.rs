//! Remote showtime directory.
//!
//! The directory owns showtime records; the board only asks it to list,
//! update, delete and sweep them. [`InMemoryShowtimeDirectory`] stands in for
//! the HTTP-backed service in development and tests.

use crate::calendar::ScheduleCalendar;
use crate::error::DirectoryError;
use crate::lifecycle;
use crate::types::{MovieRef, RoomRef, Showtime, ShowtimeId, ShowtimeStatus};
use chrono::{NaiveDate, NaiveTime};
use showtime_board_core::environment::{Clock, SystemClock};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Directory call result
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Boxed future returned by directory calls
pub type DirectoryFuture<T> = Pin<Box<dyn Future<Output = DirectoryResult<T>> + Send>>;

/// Fields for a new showtime
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewShowtime {
    /// Movie being screened
    pub movie: MovieRef,
    /// Screening room
    pub room: RoomRef,
    /// Calendar date
    pub show_date: NaiveDate,
    /// Local start time
    pub start_time: NaiveTime,
    /// Local end time
    pub end_time: NaiveTime,
}

/// Partial update; `None` fields are left as they are
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShowtimePatch {
    /// New movie
    pub movie: Option<MovieRef>,
    /// New room
    pub room: Option<RoomRef>,
    /// New date
    pub show_date: Option<NaiveDate>,
    /// New start time
    pub start_time: Option<NaiveTime>,
    /// New end time
    pub end_time: Option<NaiveTime>,
    /// New status
    pub status: Option<ShowtimeStatus>,
}

impl ShowtimePatch {
    /// Patch changing only the status
    #[must_use]
    pub fn status(status: ShowtimeStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Applies the patch to a record
    pub fn apply_to(&self, showtime: &mut Showtime) {
        if let Some(movie) = self.movie {
            showtime.movie = movie;
        }
        if let Some(room) = self.room {
            showtime.room = room;
        }
        if let Some(show_date) = self.show_date {
            showtime.show_date = show_date;
        }
        if let Some(start_time) = self.start_time {
            showtime.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            showtime.end_time = end_time;
        }
        if let Some(status) = self.status {
            showtime.status = status;
        }
    }
}

/// Showtime directory service
///
/// Implementations talk to the remote service. Timeouts and retries belong
/// here, never to the board.
pub trait ShowtimeDirectory: Send + Sync {
    /// Fetches every showtime
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be reached or refuses the request
    fn list(&self) -> DirectoryFuture<Vec<Showtime>>;

    /// Creates a showtime
    ///
    /// # Errors
    ///
    /// Returns error if the directory refuses the record
    fn create(&self, showtime: NewShowtime) -> DirectoryFuture<Showtime>;

    /// Updates a showtime and returns the stored record
    ///
    /// # Errors
    ///
    /// Returns error if the showtime does not exist or the update is refused
    fn update(&self, id: ShowtimeId, patch: ShowtimePatch) -> DirectoryFuture<Showtime>;

    /// Deletes a showtime
    ///
    /// # Errors
    ///
    /// Returns error if the showtime does not exist or the delete is refused
    fn delete(&self, id: ShowtimeId) -> DirectoryFuture<()>;

    /// Runs the expiry sweep on the server, returning how many were hidden
    ///
    /// # Errors
    ///
    /// Returns error if the sweep fails
    fn hide_expired(&self) -> DirectoryFuture<usize>;
}

/// A call received by [`InMemoryShowtimeDirectory`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectoryCall {
    /// `list()`
    List,
    /// `create(..)`
    Create,
    /// `update(id, ..)`
    Update(ShowtimeId),
    /// `delete(id)`
    Delete(ShowtimeId),
    /// `hide_expired()`
    HideExpired,
}

#[derive(Debug, Default)]
struct Records {
    showtimes: Vec<Showtime>,
    next_id: u64,
    failing_ids: HashMap<ShowtimeId, DirectoryError>,
    list_failure: Option<DirectoryError>,
    sweep_failure: Option<DirectoryError>,
    calls: Vec<DirectoryCall>,
}

/// In-memory showtime directory
///
/// Requests take effect when the call is made, before the returned future is
/// polled, the way a request already on the wire does. Failures are injected
/// per showtime id ([`Self::fail_on`]) or per operation.
#[derive(Clone)]
pub struct InMemoryShowtimeDirectory {
    records: Arc<Mutex<Records>>,
    clock: Arc<dyn Clock>,
    calendar: ScheduleCalendar,
}

impl std::fmt::Debug for InMemoryShowtimeDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryShowtimeDirectory")
            .field("records", &self.records)
            .field("calendar", &self.calendar)
            .finish_non_exhaustive()
    }
}

impl Default for InMemoryShowtimeDirectory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryShowtimeDirectory {
    /// Directory seeded with `showtimes`, sweeping against the system clock
    #[must_use]
    pub fn new(showtimes: Vec<Showtime>) -> Self {
        let next_id = showtimes.iter().map(|s| s.id.get()).max().unwrap_or(0) + 1;
        Self {
            records: Arc::new(Mutex::new(Records {
                showtimes,
                next_id,
                ..Records::default()
            })),
            clock: Arc::new(SystemClock),
            calendar: ScheduleCalendar::default(),
        }
    }

    /// Uses `clock` and `calendar` for the server-side sweep
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>, calendar: ScheduleCalendar) -> Self {
        self.clock = clock;
        self.calendar = calendar;
        self
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(self) -> Arc<dyn ShowtimeDirectory> {
        Arc::new(self)
    }

    /// Makes every update and delete of `id` fail with `error`
    pub fn fail_on(&self, id: ShowtimeId, error: DirectoryError) {
        self.lock().failing_ids.insert(id, error);
    }

    /// Makes `list` fail with `error`
    pub fn fail_list(&self, error: DirectoryError) {
        self.lock().list_failure = Some(error);
    }

    /// Makes `hide_expired` fail with `error`
    pub fn fail_hide_expired(&self, error: DirectoryError) {
        self.lock().sweep_failure = Some(error);
    }

    /// Removes every injected failure
    pub fn clear_failures(&self) {
        let mut records = self.lock();
        records.failing_ids.clear();
        records.list_failure = None;
        records.sweep_failure = None;
    }

    /// Current server-side records
    #[must_use]
    pub fn snapshot(&self) -> Vec<Showtime> {
        self.lock().showtimes.clone()
    }

    /// Calls received so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond<T: Send + 'static>(result: DirectoryResult<T>) -> DirectoryFuture<T> {
        Box::pin(async move { result })
    }
}

impl ShowtimeDirectory for InMemoryShowtimeDirectory {
    fn list(&self) -> DirectoryFuture<Vec<Showtime>> {
        let mut records = self.lock();
        records.calls.push(DirectoryCall::List);
        let result = match &records.list_failure {
            Some(error) => Err(error.clone()),
            None => Ok(records.showtimes.clone()),
        };
        Self::respond(result)
    }

    fn create(&self, showtime: NewShowtime) -> DirectoryFuture<Showtime> {
        let mut records = self.lock();
        records.calls.push(DirectoryCall::Create);
        let id = ShowtimeId::new(records.next_id);
        records.next_id += 1;
        let created = Showtime::new(
            id,
            showtime.movie,
            showtime.room,
            showtime.show_date,
            showtime.start_time,
            showtime.end_time,
        );
        records.showtimes.push(created.clone());
        Self::respond(Ok(created))
    }

    fn update(&self, id: ShowtimeId, patch: ShowtimePatch) -> DirectoryFuture<Showtime> {
        let mut records = self.lock();
        records.calls.push(DirectoryCall::Update(id));
        if let Some(error) = records.failing_ids.get(&id) {
            return Self::respond(Err(error.clone()));
        }
        let result = records
            .showtimes
            .iter_mut()
            .find(|showtime| showtime.id == id)
            .map(|showtime| {
                patch.apply_to(showtime);
                showtime.clone()
            })
            .ok_or(DirectoryError::NotFound(id));
        Self::respond(result)
    }

    fn delete(&self, id: ShowtimeId) -> DirectoryFuture<()> {
        let mut records = self.lock();
        records.calls.push(DirectoryCall::Delete(id));
        if let Some(error) = records.failing_ids.get(&id) {
            return Self::respond(Err(error.clone()));
        }
        let before = records.showtimes.len();
        records.showtimes.retain(|showtime| showtime.id != id);
        let result = if records.showtimes.len() < before {
            Ok(())
        } else {
            Err(DirectoryError::NotFound(id))
        };
        Self::respond(result)
    }

    fn hide_expired(&self) -> DirectoryFuture<usize> {
        let now = self.calendar.local(self.clock.now());
        let mut records = self.lock();
        records.calls.push(DirectoryCall::HideExpired);
        if let Some(error) = &records.sweep_failure {
            return Self::respond(Err(error.clone()));
        }
        let report = lifecycle::hide_expired(&mut records.showtimes, now);
        Self::respond(Ok(report.len()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use showtime_board_testing::fixed_clock;

    fn seed(id: u64, day: u32, hour: u32) -> Showtime {
        Showtime::new(
            ShowtimeId::new(id),
            MovieRef(1),
            RoomRef(1),
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(hour + 2, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn update_applies_patch_and_returns_record() {
        let directory = InMemoryShowtimeDirectory::new(vec![seed(1, 1, 9)]);

        let updated = directory
            .update(ShowtimeId::new(1), ShowtimePatch::status(ShowtimeStatus::Hidden))
            .await
            .unwrap();

        assert_eq!(updated.status, ShowtimeStatus::Hidden);
        assert_eq!(directory.snapshot()[0].status, ShowtimeStatus::Hidden);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let directory = InMemoryShowtimeDirectory::default();
        let error = directory.delete(ShowtimeId::new(5)).await.unwrap_err();
        assert_eq!(error, DirectoryError::NotFound(ShowtimeId::new(5)));
    }

    #[tokio::test]
    async fn injected_failure_leaves_record_in_place() {
        let directory = InMemoryShowtimeDirectory::new(vec![seed(1, 1, 9), seed(2, 1, 12)]);
        directory.fail_on(ShowtimeId::new(2), DirectoryError::rejected("in use"));

        assert!(directory.delete(ShowtimeId::new(2)).await.is_err());
        directory.delete(ShowtimeId::new(1)).await.unwrap();

        assert_eq!(directory.snapshot().len(), 1);
        assert_eq!(
            directory.calls(),
            vec![DirectoryCall::Delete(ShowtimeId::new(2)), DirectoryCall::Delete(ShowtimeId::new(1))]
        );
    }

    #[tokio::test]
    async fn create_assigns_fresh_id() {
        let directory = InMemoryShowtimeDirectory::new(vec![seed(7, 1, 9)]);
        let created = directory
            .create(NewShowtime {
                movie: MovieRef(2),
                room: RoomRef(3),
                show_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
                start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(created.id, ShowtimeId::new(8));
        assert_eq!(created.status, ShowtimeStatus::Scheduled);
    }

    #[tokio::test]
    async fn server_sweep_uses_its_clock() {
        let directory = InMemoryShowtimeDirectory::new(vec![seed(1, 1, 9), seed(2, 2, 11)])
            .with_clock(Arc::new(fixed_clock(2024, 6, 2, 10, 0)), ScheduleCalendar::default());

        assert_eq!(directory.hide_expired().await.unwrap(), 1);
        assert_eq!(directory.snapshot()[0].status, ShowtimeStatus::Hidden);
        assert_eq!(directory.snapshot()[1].status, ShowtimeStatus::Scheduled);
    }

    #[tokio::test]
    async fn list_failure_is_reported() {
        let directory = InMemoryShowtimeDirectory::new(vec![seed(1, 1, 9)]);
        directory.fail_list(DirectoryError::Transport("connection refused".to_string()));
        assert!(directory.list().await.is_err());

        directory.clear_failures();
        assert_eq!(directory.list().await.unwrap().len(), 1);
    }
}
