//! `ShowtimeAdmin`: the board as a plain async API.
//!
//! Each mutating call sends one action, waits for the whole effect cascade
//! (mandatory refetches included) and returns the outcome carried by the
//! terminal event.

use crate::board::{BoardAction, BoardEnvironment, BoardReducer, BoardState};
use crate::catalog::CatalogDirectory;
use crate::config::BoardConfig;
use crate::directory::ShowtimeDirectory;
use crate::error::{BoardError, DirectoryError, Result};
use crate::lifecycle::SweepReport;
use crate::pagination::Page;
use crate::types::{Filters, ListingView, Showtime, ShowtimeId, ShowtimeStatus};
use showtime_board_core::environment::Clock;
use showtime_board_runtime::Store;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Store running the board reducer
pub type BoardStore = Store<BoardState, BoardAction, BoardEnvironment, BoardReducer>;

/// Admin facade over a board store
#[derive(Clone)]
pub struct ShowtimeAdmin {
    store: BoardStore,
}

impl ShowtimeAdmin {
    /// Creates an empty board; call [`Self::refresh`] to load it
    #[must_use]
    pub fn new(environment: BoardEnvironment, broadcast_capacity: usize) -> Self {
        Self {
            store: Store::with_broadcast_capacity(
                BoardState::default(),
                BoardReducer::new(),
                environment,
                broadcast_capacity,
            ),
        }
    }

    /// Creates an empty board from configuration
    #[must_use]
    pub fn from_config(
        config: &BoardConfig,
        clock: Arc<dyn Clock>,
        directory: Arc<dyn ShowtimeDirectory>,
        catalog: Arc<dyn CatalogDirectory>,
    ) -> Self {
        let environment = BoardEnvironment::new(clock, directory, catalog, config);
        Self::new(environment, config.broadcast_capacity)
    }

    /// Every event the board's effects produce, whichever call triggered them
    ///
    /// Receivers that fall more than the configured broadcast capacity behind
    /// skip ahead; the admin calls themselves are unaffected.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<BoardAction> {
        self.store.subscribe_actions()
    }

    async fn dispatch<T>(
        &self,
        action: BoardAction,
        operation: &'static str,
        outcome: impl Fn(BoardAction) -> Option<std::result::Result<T, DirectoryError>>,
    ) -> Result<T> {
        self.store
            .send_and_collect(action)
            .await
            .into_iter()
            .find_map(outcome)
            .ok_or(BoardError::MissingOutcome { operation })?
            .map_err(BoardError::from)
    }

    // ========== Lifecycle ==========

    /// Refetches the collection
    ///
    /// # Errors
    ///
    /// Returns the directory failure; the last known collection is kept.
    pub async fn refresh(&self) -> Result<()> {
        self.dispatch(BoardAction::Refresh, "refresh", |action| match action {
            BoardAction::Loaded { .. } => Some(Ok(())),
            BoardAction::LoadFailed { error } => Some(Err(error)),
            _ => None,
        })
        .await
    }

    /// Changes one showtime's status and returns the stored record
    ///
    /// # Errors
    ///
    /// Returns the directory failure; local state is left unchanged.
    pub async fn set_status(
        &self,
        id: ShowtimeId,
        status: ShowtimeStatus,
    ) -> Result<Showtime> {
        let action = BoardAction::SetStatus { id, status };
        self.dispatch(action, "set_status", move |action| match action {
            BoardAction::StatusUpdated { showtime } if showtime.id == id => Some(Ok(showtime)),
            BoardAction::StatusUpdateFailed { id: failed, error } if failed == id => {
                Some(Err(error))
            },
            _ => None,
        })
        .await
    }

    /// Hides started showtimes, locally and on the server, then refetches
    ///
    /// # Errors
    ///
    /// Returns the server-side failure. Local flips stay until the refetch
    /// replaces them.
    pub async fn hide_expired(&self) -> Result<SweepReport> {
        self.dispatch(BoardAction::HideExpired, "hide_expired", |action| match action {
            BoardAction::ExpiredHiddenOnServer { report, .. } => Some(Ok(report)),
            BoardAction::HideExpiredFailed { error, .. } => Some(Err(error)),
            _ => None,
        })
        .await
    }

    /// Deletes one showtime
    ///
    /// # Errors
    ///
    /// Returns the directory failure; local state is left unchanged.
    pub async fn delete(&self, id: ShowtimeId) -> Result<()> {
        self.dispatch(BoardAction::DeleteShowtime { id }, "delete", move |action| match action {
            BoardAction::ShowtimeDeleted { id: deleted } if deleted == id => Some(Ok(())),
            BoardAction::DeleteFailed { id: failed, error } if failed == id => Some(Err(error)),
            _ => None,
        })
        .await
    }

    /// Deletes several showtimes concurrently, then refetches
    ///
    /// # Errors
    ///
    /// Returns the first failure even when other deletes went through; the
    /// refetch has already reconciled local state when this returns.
    pub async fn bulk_delete(&self, ids: Vec<ShowtimeId>) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.dispatch(BoardAction::BulkDelete { ids }, "bulk_delete", Self::bulk_outcome)
            .await
    }

    /// Bulk deletes the current selection
    ///
    /// # Errors
    ///
    /// Same as [`Self::bulk_delete`].
    pub async fn delete_selected(&self) -> Result<()> {
        if self.selection().await.is_empty() {
            return Ok(());
        }
        self.dispatch(BoardAction::DeleteSelected, "delete_selected", Self::bulk_outcome)
            .await
    }

    fn bulk_outcome(action: BoardAction) -> Option<std::result::Result<(), DirectoryError>> {
        match action {
            BoardAction::BulkDeleteFinished { result, .. } => Some(result),
            _ => None,
        }
    }

    // ========== Query and view ==========

    /// Replaces every filter
    pub async fn set_filters(&self, filters: Filters) {
        self.store.send(BoardAction::SetFilters { filters }).await;
    }

    /// Changes the search term
    pub async fn set_search(&self, search: impl Into<String>) {
        self.store
            .send(BoardAction::SetSearch {
                search: search.into(),
            })
            .await;
    }

    /// Switches the listing lens
    pub async fn set_view(&self, view: ListingView) {
        self.store.send(BoardAction::SetView { view }).await;
    }

    /// Jumps to a page; out-of-range requests land on the last page
    pub async fn go_to_page(&self, page_index: usize) {
        self.store.send(BoardAction::GoToPage { page_index }).await;
    }

    /// Selects or deselects one showtime on the current page
    pub async fn toggle(&self, id: ShowtimeId) {
        self.store.send(BoardAction::ToggleSelection { id }).await;
    }

    /// Selects the current page, or clears when it is already selected
    pub async fn select_all_visible(&self) {
        self.store.send(BoardAction::SelectAllVisible).await;
    }

    /// Deselects everything
    pub async fn clear_selection(&self) {
        self.store.send(BoardAction::ClearSelection).await;
    }

    // ========== Reads ==========

    /// The rendered page
    pub async fn current_page(&self) -> Page<Showtime> {
        self.store.state(|state| state.page.clone()).await
    }

    /// Every showtime passing filters and lens
    pub async fn visible(&self) -> Vec<Showtime> {
        self.store.state(|state| state.visible().to_vec()).await
    }

    /// Last known collection
    pub async fn showtimes(&self) -> Vec<Showtime> {
        self.store.state(|state| state.showtimes.clone()).await
    }

    /// Selected ids
    pub async fn selection(&self) -> Vec<ShowtimeId> {
        self.store.state(|state| state.selection.ids()).await
    }

    /// Current filters
    pub async fn filters(&self) -> Filters {
        self.store.state(|state| state.filters.clone()).await
    }

    /// Message for the last failed operation
    pub async fn last_error(&self) -> Option<String> {
        self.store.state(|state| state.last_error.clone()).await
    }
}
