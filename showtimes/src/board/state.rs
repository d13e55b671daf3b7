//! State owned by the board store.

use crate::filter::FilterCache;
use crate::lifecycle::SweepReport;
use crate::pagination::Page;
use crate::selection::SelectionSet;
use crate::types::{Filters, ListingView, Showtime, ShowtimeId};

/// The admin board's view of the showtime collection
///
/// `showtimes` mirrors the directory as of the last fetch plus any confirmed
/// local mutations. `page` and `selection` are derived and rebuilt by the
/// reducer after every action.
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    /// Last known collection, enriched with display names
    pub showtimes: Vec<Showtime>,
    /// Current query
    pub filters: Filters,
    /// Scheduled/hidden lens
    pub view: ListingView,
    /// Requested page, kept within range by the reducer
    pub page_index: usize,
    /// The rendered page
    pub page: Page<Showtime>,
    /// Ids selected for bulk operations, always a subset of `page`
    pub selection: SelectionSet,
    /// Memoized filter result
    pub cache: FilterCache,
    /// Message for the last failed operation
    pub last_error: Option<String>,
    /// Result of the last local expiry sweep
    pub last_sweep: Option<SweepReport>,
    /// A fetch is in flight
    pub loading: bool,
}

impl BoardState {
    /// Board seeded with an already fetched collection
    #[must_use]
    pub fn with_showtimes(showtimes: Vec<Showtime>) -> Self {
        Self {
            showtimes,
            ..Self::default()
        }
    }

    /// Looks up a showtime by id
    #[must_use]
    pub fn get(&self, id: ShowtimeId) -> Option<&Showtime> {
        self.showtimes.iter().find(|showtime| showtime.id == id)
    }

    /// Whether the collection holds `id`
    #[must_use]
    pub fn contains(&self, id: ShowtimeId) -> bool {
        self.get(id).is_some()
    }

    /// Ids on the rendered page, in display order
    #[must_use]
    pub fn page_ids(&self) -> Vec<ShowtimeId> {
        self.page.items.iter().map(|showtime| showtime.id).collect()
    }

    /// Every showtime passing filters and lens, across all pages
    #[must_use]
    pub fn visible(&self) -> &[Showtime] {
        self.cache.visible()
    }
}
