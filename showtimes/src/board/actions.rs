//! Actions understood by the board reducer.

use crate::error::DirectoryError;
use crate::lifecycle::SweepReport;
use crate::types::{
    DateFilter, Filters, ListingView, Showtime, ShowtimeId, ShowtimeStatus, StatusFilter,
};
use chrono::NaiveDate;

/// Commands from the admin UI and events produced by directory effects
#[derive(Clone, Debug, PartialEq)]
pub enum BoardAction {
    // Commands
    /// Refetch the whole collection
    Refresh,
    /// Change the search term
    SetSearch {
        /// New search term
        search: String,
    },
    /// Change the temporal category
    SetDateFilter {
        /// New category
        date_filter: DateFilter,
    },
    /// Pick (or unset) the custom date
    SetCustomDate {
        /// Date used by `custom-date`
        custom_date: Option<NaiveDate>,
    },
    /// Change the status restriction
    SetStatusFilter {
        /// New restriction
        status_filter: StatusFilter,
    },
    /// Replace every filter at once
    SetFilters {
        /// New filters
        filters: Filters,
    },
    /// Back to default filters
    ResetFilters,
    /// Switch the listing lens
    SetView {
        /// New lens
        view: ListingView,
    },
    /// Jump to a page
    GoToPage {
        /// Zero-based page index
        page_index: usize,
    },
    /// Select or deselect one showtime
    ToggleSelection {
        /// Showtime to toggle
        id: ShowtimeId,
    },
    /// Select the whole page, or clear when it is already selected
    SelectAllVisible,
    /// Deselect everything
    ClearSelection,
    /// Ask the directory to change a status
    SetStatus {
        /// Target showtime
        id: ShowtimeId,
        /// Requested status
        status: ShowtimeStatus,
    },
    /// Hide started showtimes locally and on the server
    HideExpired,
    /// Delete one showtime
    DeleteShowtime {
        /// Target showtime
        id: ShowtimeId,
    },
    /// Delete several showtimes, all or nothing
    BulkDelete {
        /// Target showtimes
        ids: Vec<ShowtimeId>,
    },
    /// Bulk delete the current selection
    DeleteSelected,

    // Events
    /// The directory returned the collection
    Loaded {
        /// Enriched records
        showtimes: Vec<Showtime>,
    },
    /// Fetching the collection failed
    LoadFailed {
        /// Directory failure
        error: DirectoryError,
    },
    /// The directory accepted a status change
    StatusUpdated {
        /// Record as stored by the directory
        showtime: Showtime,
    },
    /// The directory refused a status change
    StatusUpdateFailed {
        /// Target showtime
        id: ShowtimeId,
        /// Directory failure
        error: DirectoryError,
    },
    /// The directory deleted a showtime
    ShowtimeDeleted {
        /// Deleted showtime
        id: ShowtimeId,
    },
    /// The directory refused a delete
    DeleteFailed {
        /// Target showtime
        id: ShowtimeId,
        /// Directory failure
        error: DirectoryError,
    },
    /// Every delete of a bulk operation has been answered, or one failed
    BulkDeleteFinished {
        /// Requested ids
        ids: Vec<ShowtimeId>,
        /// First failure, if any
        result: Result<(), DirectoryError>,
    },
    /// The server-side sweep succeeded
    ExpiredHiddenOnServer {
        /// What the local sweep hid
        report: SweepReport,
        /// How many the server hid
        server_hidden: usize,
    },
    /// The server-side sweep failed
    HideExpiredFailed {
        /// What the local sweep hid
        report: SweepReport,
        /// Directory failure
        error: DirectoryError,
    },
}

impl BoardAction {
    /// Whether this action changes the query or lens, sending the board back to page 1
    #[must_use]
    pub const fn resets_page(&self) -> bool {
        matches!(
            self,
            Self::SetSearch { .. }
                | Self::SetDateFilter { .. }
                | Self::SetCustomDate { .. }
                | Self::SetStatusFilter { .. }
                | Self::SetFilters { .. }
                | Self::ResetFilters
                | Self::SetView { .. }
        )
    }
}
