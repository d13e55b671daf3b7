//! Domain types for the showtime board.
//!
//! A showtime is one scheduled screening of a movie in a room. Records are
//! owned by the remote showtime directory; the board only reads them, filters
//! them and asks the directory to flip their status.

use crate::error::ParseFilterError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a showtime
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowtimeId(u64);

impl ShowtimeId {
    /// Creates a `ShowtimeId` from its raw value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ShowtimeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ShowtimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a movie in the catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieRef(pub u64);

/// Opaque reference to a screening room in the catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomRef(pub u64);

/// Lifecycle status of a showtime
///
/// Only these two states exist on the board; transitions are always
/// `Scheduled ↔ Hidden`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowtimeStatus {
    /// Visible to customers
    #[default]
    Scheduled,
    /// Administratively suppressed, manually or by the expiry sweep
    Hidden,
}

impl fmt::Display for ShowtimeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Hidden => write!(f, "hidden"),
        }
    }
}

/// A scheduled screening
///
/// `room_name`, `movie_name` and `movie_duration` are filled in by
/// [`crate::catalog::enrich`] after every fetch. They are display annotations
/// and only ever take part in search matching.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showtime {
    /// Unique identifier
    pub id: ShowtimeId,
    /// Movie being screened
    pub movie: MovieRef,
    /// Room the screening takes place in
    pub room: RoomRef,
    /// Calendar date of the screening
    pub show_date: NaiveDate,
    /// Local start time on `show_date`
    pub start_time: NaiveTime,
    /// Local end time on `show_date`
    pub end_time: NaiveTime,
    /// Lifecycle status
    pub status: ShowtimeStatus,
    /// Room display name
    #[serde(default)]
    pub room_name: Option<String>,
    /// Movie display name
    #[serde(default)]
    pub movie_name: Option<String>,
    /// Movie running time in minutes
    #[serde(default)]
    pub movie_duration: Option<u32>,
}

impl Showtime {
    /// Creates a scheduled showtime without display annotations
    #[must_use]
    pub const fn new(
        id: ShowtimeId,
        movie: MovieRef,
        room: RoomRef,
        show_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id,
            movie,
            room,
            show_date,
            start_time,
            end_time,
            status: ShowtimeStatus::Scheduled,
            room_name: None,
            movie_name: None,
            movie_duration: None,
        }
    }

    /// Local instant the screening starts
    #[must_use]
    pub fn starts_at(&self) -> NaiveDateTime {
        self.show_date.and_time(self.start_time)
    }

    /// Local instant the screening ends
    ///
    /// Screenings crossing midnight are not modeled; the end time is always
    /// combined with `show_date`.
    #[must_use]
    pub fn ends_at(&self) -> NaiveDateTime {
        self.show_date.and_time(self.end_time)
    }

    /// Whether the showtime is customer visible
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.status == ShowtimeStatus::Scheduled
    }
}

/// Temporal category used to filter showtimes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFilter {
    /// No temporal restriction
    #[default]
    All,
    /// Shows dated today
    Today,
    /// Shows dated tomorrow
    Tomorrow,
    /// From today to the end of the configured week
    ThisWeek,
    /// The seven days after this week's upper bound
    NextWeek,
    /// The current calendar month
    ThisMonth,
    /// The next calendar month
    NextMonth,
    /// Dated today or later
    Upcoming,
    /// Dated before today
    Past,
    /// Ended before now
    Expired,
    /// Running right now, both boundaries inclusive
    Active,
    /// Dated on `Filters::custom_date`
    CustomDate,
}

impl DateFilter {
    /// Wire name of the category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::ThisWeek => "this-week",
            Self::NextWeek => "next-week",
            Self::ThisMonth => "this-month",
            Self::NextMonth => "next-month",
            Self::Upcoming => "upcoming",
            Self::Past => "past",
            Self::Expired => "expired",
            Self::Active => "active",
            Self::CustomDate => "custom-date",
        }
    }

    /// Every category, in menu order
    pub const ALL: [Self; 12] = [
        Self::All,
        Self::Today,
        Self::Tomorrow,
        Self::ThisWeek,
        Self::NextWeek,
        Self::ThisMonth,
        Self::NextMonth,
        Self::Upcoming,
        Self::Past,
        Self::Expired,
        Self::Active,
        Self::CustomDate,
    ];
}

impl FromStr for DateFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseFilterError::UnknownDateFilter(s.to_string()))
    }
}

/// Status restriction chosen in the admin UI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Any status
    #[default]
    All,
    /// Only `Scheduled`
    Scheduled,
    /// Only `Hidden`
    Hidden,
}

impl FromStr for StatusFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "scheduled" => Ok(Self::Scheduled),
            "hidden" => Ok(Self::Hidden),
            other => Err(ParseFilterError::UnknownStatusFilter(other.to_string())),
        }
    }
}

/// Binary listing lens layered on top of [`StatusFilter`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingView {
    /// Show only scheduled showtimes
    #[default]
    Scheduled,
    /// Show only hidden showtimes
    Hidden,
}

impl ListingView {
    /// Whether a showtime passes the lens
    #[must_use]
    pub fn admits(self, showtime: &Showtime) -> bool {
        match self {
            Self::Scheduled => showtime.status == ShowtimeStatus::Scheduled,
            Self::Hidden => showtime.status == ShowtimeStatus::Hidden,
        }
    }

    /// The other view
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Scheduled => Self::Hidden,
            Self::Hidden => Self::Scheduled,
        }
    }
}

/// Transient query state of the admin listing
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Free-text search over room and movie names
    pub search: String,
    /// Temporal category
    pub date_filter: DateFilter,
    /// Date used by [`DateFilter::CustomDate`]
    pub custom_date: Option<NaiveDate>,
    /// Status restriction
    pub status_filter: StatusFilter,
}

impl Filters {
    /// Parses a date input value; an empty input means "unset"
    ///
    /// # Errors
    ///
    /// Returns [`ParseFilterError::InvalidDate`] if the input is neither empty
    /// nor a `YYYY-MM-DD` date.
    pub fn parse_custom_date(input: &str) -> Result<Option<NaiveDate>, ParseFilterError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ParseFilterError::InvalidDate(input.to_string()))
    }
}
