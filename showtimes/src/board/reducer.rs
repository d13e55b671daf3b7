//! Reducer for the showtime board.
//!
//! Commands that need the directory return an [`Effect::Future`] that calls it
//! and feeds the outcome back as an event. Events apply the confirmed outcome
//! to state. After every action the view is re-derived: filter and lens,
//! page index, then selection.

use super::actions::BoardAction;
use super::state::BoardState;
use crate::catalog::{self, CatalogDirectory};
use crate::config::BoardConfig;
use crate::directory::{ShowtimeDirectory, ShowtimePatch};
use crate::error::DirectoryError;
use crate::filter::FilterEngine;
use crate::lifecycle;
use crate::pagination::{clamp_page_index, paginate};
use crate::types::{Filters, ShowtimeId, ShowtimeStatus};
use futures::future::try_join_all;
use showtime_board_core::{
    async_effect, effect::Effect, environment::Clock, reducer::Reducer, smallvec, SmallVec,
};
use std::sync::Arc;

const LOAD_FAILED: &str = "Failed to load showtimes";
const UPDATE_FAILED: &str = "Failed to update showtime status";
const DELETE_FAILED: &str = "Failed to delete showtime";
const BULK_DELETE_FAILED: &str = "Failed to delete selected showtimes";
const HIDE_EXPIRED_FAILED: &str = "Failed to hide expired showtimes";

/// Environment dependencies for the board reducer
#[derive(Clone)]
pub struct BoardEnvironment {
    /// Source of "now" for temporal categories and the sweep
    pub clock: Arc<dyn Clock>,
    /// Remote showtime directory
    pub directory: Arc<dyn ShowtimeDirectory>,
    /// Movie/room display data
    pub catalog: Arc<dyn CatalogDirectory>,
    /// Filter engine bound to the cinema calendar
    pub engine: FilterEngine,
    /// Showtimes per page
    pub page_size: usize,
}

impl BoardEnvironment {
    /// Creates a new `BoardEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        directory: Arc<dyn ShowtimeDirectory>,
        catalog: Arc<dyn CatalogDirectory>,
        config: &BoardConfig,
    ) -> Self {
        Self {
            clock,
            directory,
            catalog,
            engine: FilterEngine::new(config.calendar()),
            page_size: config.page_size.max(1),
        }
    }
}

/// Reducer for the showtime board
#[derive(Clone, Debug, Default)]
pub struct BoardReducer;

impl BoardReducer {
    /// Creates a new `BoardReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fetches and enriches the whole collection
    fn fetch(env: &BoardEnvironment) -> Effect<BoardAction> {
        let directory = Arc::clone(&env.directory);
        let catalog = Arc::clone(&env.catalog);
        async_effect! {
            match directory.list().await {
                Ok(mut showtimes) => {
                    catalog::enrich(&mut showtimes, catalog.as_ref());
                    tracing::debug!(count = showtimes.len(), "Showtimes loaded");
                    Some(BoardAction::Loaded { showtimes })
                },
                Err(error) => {
                    tracing::warn!(%error, "Failed to load showtimes");
                    Some(BoardAction::LoadFailed { error })
                },
            }
        }
    }

    /// Reports an outcome decided without calling the directory
    fn emit(action: BoardAction) -> Effect<BoardAction> {
        async_effect! { Some(action) }
    }

    fn set_status(
        state: &BoardState,
        id: ShowtimeId,
        status: ShowtimeStatus,
        env: &BoardEnvironment,
    ) -> Effect<BoardAction> {
        if !state.contains(id) {
            tracing::warn!(%id, "Status change for unknown showtime");
            return Self::emit(BoardAction::StatusUpdateFailed {
                id,
                error: DirectoryError::NotFound(id),
            });
        }

        let directory = Arc::clone(&env.directory);
        async_effect! {
            match directory.update(id, ShowtimePatch::status(status)).await {
                Ok(showtime) => {
                    tracing::debug!(%id, %status, "Showtime status updated");
                    Some(BoardAction::StatusUpdated { showtime })
                },
                Err(error) => {
                    tracing::warn!(%id, %error, "Showtime status update failed");
                    Some(BoardAction::StatusUpdateFailed { id, error })
                },
            }
        }
    }

    fn delete(state: &BoardState, id: ShowtimeId, env: &BoardEnvironment) -> Effect<BoardAction> {
        if !state.contains(id) {
            tracing::warn!(%id, "Delete of unknown showtime");
            return Self::emit(BoardAction::DeleteFailed {
                id,
                error: DirectoryError::NotFound(id),
            });
        }

        let directory = Arc::clone(&env.directory);
        async_effect! {
            match directory.delete(id).await {
                Ok(()) => {
                    tracing::debug!(%id, "Showtime deleted");
                    Some(BoardAction::ShowtimeDeleted { id })
                },
                Err(error) => {
                    tracing::warn!(%id, %error, "Showtime delete failed");
                    Some(BoardAction::DeleteFailed { id, error })
                },
            }
        }
    }

    /// One delete per id, joined all-or-nothing
    ///
    /// Deletes already applied by the server stay applied when another one
    /// fails; the refetch after [`BoardAction::BulkDeleteFinished`] reconciles.
    fn bulk_delete(
        ids: Vec<ShowtimeId>,
        env: &BoardEnvironment,
    ) -> SmallVec<[Effect<BoardAction>; 4]> {
        if ids.is_empty() {
            tracing::debug!("Bulk delete with nothing selected");
            return SmallVec::new();
        }

        let directory = Arc::clone(&env.directory);
        smallvec![async_effect! {
            let result = try_join_all(ids.iter().map(|&id| directory.delete(id)))
                .await
                .map(|_| ());
            match &result {
                Ok(()) => tracing::info!(count = ids.len(), "Bulk delete finished"),
                Err(error) => tracing::warn!(count = ids.len(), %error, "Bulk delete failed"),
            }
            Some(BoardAction::BulkDeleteFinished { ids, result })
        }]
    }

    fn hide_expired(state: &mut BoardState, env: &BoardEnvironment) -> Effect<BoardAction> {
        let now = env.engine.local_now(env.clock.now()).at;
        let report = lifecycle::hide_expired(&mut state.showtimes, now);
        tracing::info!(hidden = report.len(), %now, "Expired showtimes hidden locally");
        state.last_sweep = Some(report.clone());

        let directory = Arc::clone(&env.directory);
        async_effect! {
            match directory.hide_expired().await {
                Ok(server_hidden) => {
                    tracing::debug!(server_hidden, "Server sweep finished");
                    Some(BoardAction::ExpiredHiddenOnServer { report, server_hidden })
                },
                Err(error) => {
                    tracing::warn!(%error, "Server sweep failed");
                    Some(BoardAction::HideExpiredFailed { report, error })
                },
            }
        }
    }

    /// Marks a fetch in flight and returns it
    fn refetch(
        state: &mut BoardState,
        env: &BoardEnvironment,
    ) -> SmallVec<[Effect<BoardAction>; 4]> {
        state.loading = true;
        smallvec![Self::fetch(env)]
    }

    fn handle(
        state: &mut BoardState,
        action: BoardAction,
        env: &BoardEnvironment,
    ) -> SmallVec<[Effect<BoardAction>; 4]> {
        match action {
            // ========== Commands ==========
            BoardAction::Refresh => {
                state.last_error = None;
                return Self::refetch(state, env);
            },
            BoardAction::SetSearch { search } => state.filters.search = search,
            BoardAction::SetDateFilter { date_filter } => state.filters.date_filter = date_filter,
            BoardAction::SetCustomDate { custom_date } => state.filters.custom_date = custom_date,
            BoardAction::SetStatusFilter { status_filter } => {
                state.filters.status_filter = status_filter;
            },
            BoardAction::SetFilters { filters } => state.filters = filters,
            BoardAction::ResetFilters => state.filters = Filters::default(),
            BoardAction::SetView { view } => state.view = view,
            BoardAction::GoToPage { page_index } => state.page_index = page_index,
            BoardAction::ToggleSelection { id } => state.selection.toggle(id),
            BoardAction::SelectAllVisible => {
                let page_ids = state.page_ids();
                state.selection.select_all_visible(&page_ids);
            },
            BoardAction::ClearSelection => state.selection.clear(),
            BoardAction::SetStatus { id, status } => {
                return smallvec![Self::set_status(state, id, status, env)];
            },
            BoardAction::HideExpired => return smallvec![Self::hide_expired(state, env)],
            BoardAction::DeleteShowtime { id } => return smallvec![Self::delete(state, id, env)],
            BoardAction::BulkDelete { ids } => return Self::bulk_delete(ids, env),
            BoardAction::DeleteSelected => return Self::bulk_delete(state.selection.ids(), env),

            // ========== Events ==========
            BoardAction::Loaded { showtimes } => {
                // A failure reported by the operation that triggered this
                // refetch stays visible
                state.showtimes = showtimes;
                state.loading = false;
                state.selection.clear();
            },
            BoardAction::LoadFailed { error } => {
                // Last known collection stays
                state.loading = false;
                state.last_error = Some(error.user_message(LOAD_FAILED));
            },
            BoardAction::StatusUpdated { showtime } => {
                lifecycle::apply_status(&mut state.showtimes, showtime.id, showtime.status);
                state.last_error = None;
            },
            BoardAction::StatusUpdateFailed { error, .. } => {
                state.last_error = Some(error.user_message(UPDATE_FAILED));
            },
            BoardAction::ShowtimeDeleted { id } => {
                state.showtimes.retain(|showtime| showtime.id != id);
                state.last_error = None;
            },
            BoardAction::DeleteFailed { error, .. } => {
                state.last_error = Some(error.user_message(DELETE_FAILED));
            },
            BoardAction::BulkDeleteFinished { result, .. } => {
                state.last_error = result.err().map(|error| error.user_message(BULK_DELETE_FAILED));
                state.selection.clear();
                return Self::refetch(state, env);
            },
            BoardAction::ExpiredHiddenOnServer { .. } => {
                state.last_error = None;
                return Self::refetch(state, env);
            },
            BoardAction::HideExpiredFailed { error, .. } => {
                state.last_error = Some(error.user_message(HIDE_EXPIRED_FAILED));
                return Self::refetch(state, env);
            },
        }
        SmallVec::new()
    }

    /// Rebuilds page and selection from the collection
    fn rederive(state: &mut BoardState, env: &BoardEnvironment, reset_page: bool) {
        let visible = state.cache.refresh(
            &env.engine,
            &state.showtimes,
            &state.filters,
            state.view,
            env.clock.now(),
        );

        let requested = if reset_page { 0 } else { state.page_index };
        let page_index = clamp_page_index(requested, visible.len(), env.page_size);
        if page_index != requested {
            tracing::debug!(requested, page_index, "Page index clamped");
        }

        state.page = paginate(visible, env.page_size, page_index);
        state.page_index = page_index;

        let page_ids = state.page_ids();
        state.selection.retain_visible(&page_ids);
    }
}

impl Reducer for BoardReducer {
    type State = BoardState;
    type Action = BoardAction;
    type Environment = BoardEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let reset_page = action.resets_page();
        let effects = Self::handle(state, action, env);
        Self::rederive(state, env, reset_page);
        effects
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::directory::InMemoryShowtimeDirectory;
    use crate::types::{DateFilter, ListingView, MovieRef, RoomRef, Showtime, StatusFilter};
    use chrono::{NaiveDate, NaiveTime};
    use showtime_board_testing::{ReducerTest, assertions, fixed_clock};

    fn showtime(id: u64, day: u32, hour: u32) -> Showtime {
        let mut showtime = Showtime::new(
            ShowtimeId::new(id),
            MovieRef(1),
            RoomRef(1),
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(hour + 2, 0, 0).unwrap(),
        );
        showtime.movie_name = Some(format!("Movie {id}"));
        showtime
    }

    /// `count` scheduled showtimes on 2024-06-03, ids from 1
    fn many(count: u64) -> Vec<Showtime> {
        (1..=count).map(|id| showtime(id, 3, 10)).collect()
    }

    fn env_with(directory: InMemoryShowtimeDirectory, page_size: usize) -> BoardEnvironment {
        let config = BoardConfig {
            page_size,
            ..BoardConfig::default()
        };
        BoardEnvironment::new(
            Arc::new(fixed_clock(2024, 6, 2, 10, 0)),
            directory.shared(),
            InMemoryCatalog::new().shared(),
            &config,
        )
    }

    fn env(page_size: usize) -> BoardEnvironment {
        env_with(InMemoryShowtimeDirectory::default(), page_size)
    }

    fn ids(raw: impl IntoIterator<Item = u64>) -> Vec<ShowtimeId> {
        raw.into_iter().map(ShowtimeId::new).collect()
    }

    async fn run_single(effects: SmallVec<[Effect<BoardAction>; 4]>) -> Option<BoardAction> {
        let mut effects = effects.into_vec();
        assert_eq!(effects.len(), 1, "expected exactly one effect");
        match effects.remove(0) {
            Effect::Future(fut) => fut.await,
            other => panic!("expected a future effect, got {other:?}"),
        }
    }

    #[test]
    fn filter_change_resets_page() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(25)))
            .when_action(BoardAction::GoToPage { page_index: 2 })
            .when_action(BoardAction::SetSearch {
                search: "movie".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.page_index, 0);
                assert_eq!(state.page.total_pages, 3);
                assert_eq!(state.page.items.len(), 10);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn every_query_or_lens_change_resets_page() {
        let changes = [
            BoardAction::SetDateFilter {
                date_filter: DateFilter::Tomorrow,
            },
            BoardAction::SetCustomDate {
                custom_date: NaiveDate::from_ymd_opt(2024, 6, 3),
            },
            BoardAction::SetStatusFilter {
                status_filter: StatusFilter::Scheduled,
            },
            BoardAction::SetFilters {
                filters: Filters::default(),
            },
            BoardAction::ResetFilters,
            BoardAction::SetView {
                view: ListingView::Scheduled,
            },
        ];

        for change in changes {
            ReducerTest::new(BoardReducer::new())
                .with_env(env(10))
                .given_state(BoardState::with_showtimes(many(25)))
                .when_action(BoardAction::GoToPage { page_index: 2 })
                .when_action(change)
                .then_state(|state| {
                    assert_eq!(state.page_index, 0);
                    assert_eq!(state.page.total_pages, 3);
                    assert_eq!(state.page_ids(), ids(1..=10));
                })
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn custom_date_without_matches_leaves_single_empty_page() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(25)))
            .when_action(BoardAction::SetDateFilter {
                date_filter: DateFilter::CustomDate,
            })
            .when_action(BoardAction::SetCustomDate {
                custom_date: NaiveDate::from_ymd_opt(2024, 6, 4),
            })
            .then_state(|state| {
                assert!(state.visible().is_empty());
                assert!(state.page.items.is_empty());
                assert_eq!(state.page.total_pages, 1);
            })
            .run();
    }

    #[test]
    fn reset_filters_restores_full_listing() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(25)))
            .when_action(BoardAction::SetDateFilter {
                date_filter: DateFilter::CustomDate,
            })
            .when_action(BoardAction::SetCustomDate {
                custom_date: NaiveDate::from_ymd_opt(2024, 6, 4),
            })
            .when_action(BoardAction::SetSearch {
                search: "nothing like this".to_string(),
            })
            .when_action(BoardAction::ResetFilters)
            .then_state(|state| {
                assert_eq!(state.filters, Filters::default());
                assert_eq!(state.visible().len(), 25);
                assert_eq!(state.page.total_pages, 3);
            })
            .run();
    }

    #[test]
    fn clear_selection_keeps_page() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(25)))
            .when_action(BoardAction::GoToPage { page_index: 1 })
            .when_action(BoardAction::SelectAllVisible)
            .when_action(BoardAction::ClearSelection)
            .then_state(|state| {
                assert!(state.selection.is_empty());
                assert_eq!(state.page_index, 1);
                assert_eq!(state.page_ids(), ids(11..=20));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn page_index_is_clamped_when_collection_shrinks() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(25)))
            .when_action(BoardAction::GoToPage { page_index: 2 })
            .when_action(BoardAction::Loaded { showtimes: many(12) })
            .then_state(|state| {
                assert_eq!(state.page_index, 1);
                assert_eq!(state.page_ids(), ids(11..=12));
            })
            .run();
    }

    #[test]
    fn overshooting_page_request_lands_on_last_page() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(25)))
            .when_action(BoardAction::GoToPage { page_index: 40 })
            .then_state(|state| {
                assert_eq!(state.page_index, 2);
                assert_eq!(state.page.items.len(), 5);
            })
            .run();
    }

    #[test]
    fn select_all_visible_selects_current_page_only() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(25)))
            .when_action(BoardAction::GoToPage { page_index: 1 })
            .when_action(BoardAction::SelectAllVisible)
            .then_state(|state| {
                assert_eq!(state.visible().len(), 25);
                assert_eq!(state.selection.ids(), ids(11..=20));
            })
            .run();
    }

    #[test]
    fn changing_page_prunes_selection() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(25)))
            .when_action(BoardAction::GoToPage { page_index: 0 })
            .when_action(BoardAction::SelectAllVisible)
            .when_action(BoardAction::GoToPage { page_index: 1 })
            .then_state(|state| assert!(state.selection.is_empty()))
            .run();
    }

    #[test]
    fn view_lens_applies_on_top_of_status_filter() {
        let mut showtimes = many(3);
        showtimes[2].status = ShowtimeStatus::Hidden;

        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(showtimes))
            .when_action(BoardAction::SetView {
                view: ListingView::Hidden,
            })
            .then_state(|state| assert_eq!(state.page_ids(), ids([3])))
            .run();
    }

    #[test]
    fn load_failure_keeps_last_known_collection() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(3)))
            .when_action(BoardAction::Refresh)
            .when_action(BoardAction::LoadFailed {
                error: DirectoryError::Rejected { message: None },
            })
            .then_state(|state| {
                assert_eq!(state.showtimes.len(), 3);
                assert!(!state.loading);
                assert_eq!(state.last_error.as_deref(), Some(LOAD_FAILED));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn refresh_starts_a_fetch() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::default())
            .when_action(BoardAction::Refresh)
            .then_state(|state| assert!(state.loading))
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn loaded_clears_selection() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(3)))
            .when_action(BoardAction::GoToPage { page_index: 0 })
            .when_action(BoardAction::SelectAllVisible)
            .when_action(BoardAction::Loaded { showtimes: many(3) })
            .then_state(|state| assert!(state.selection.is_empty()))
            .run();
    }

    #[test]
    fn status_update_failure_leaves_collection_unchanged() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(2)))
            .when_action(BoardAction::StatusUpdateFailed {
                id: ShowtimeId::new(1),
                error: DirectoryError::rejected("Showtime has sold tickets"),
            })
            .then_state(|state| {
                assert!(state.showtimes.iter().all(Showtime::is_scheduled));
                assert_eq!(state.last_error.as_deref(), Some("Showtime has sold tickets"));
            })
            .run();
    }

    #[test]
    fn hide_expired_flips_started_showtimes_locally() {
        let showtimes = vec![showtime(1, 1, 9), showtime(2, 2, 11)];

        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(showtimes))
            .when_action(BoardAction::HideExpired)
            .then_state(|state| {
                assert_eq!(state.get(ShowtimeId::new(1)).unwrap().status, ShowtimeStatus::Hidden);
                assert_eq!(state.get(ShowtimeId::new(2)).unwrap().status, ShowtimeStatus::Scheduled);
                let sweep = state.last_sweep.as_ref().unwrap();
                assert_eq!(sweep.hidden_ids.iter().copied().collect::<Vec<_>>(), ids([1]));
                assert_eq!(state.page_ids(), ids([2]));
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
    }

    #[test]
    fn failed_bulk_delete_reports_and_refetches() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(3)))
            .when_action(BoardAction::GoToPage { page_index: 0 })
            .when_action(BoardAction::SelectAllVisible)
            .when_action(BoardAction::BulkDeleteFinished {
                ids: ids(1..=3),
                result: Err(DirectoryError::Rejected { message: None }),
            })
            .then_state(|state| {
                // No local rollback or removal, the refetch decides
                assert_eq!(state.showtimes.len(), 3);
                assert!(state.selection.is_empty());
                assert!(state.loading);
                assert_eq!(state.last_error.as_deref(), Some(BULK_DELETE_FAILED));
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn empty_bulk_delete_does_nothing() {
        ReducerTest::new(BoardReducer::new())
            .with_env(env(10))
            .given_state(BoardState::with_showtimes(many(3)))
            .when_action(BoardAction::DeleteSelected)
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[tokio::test]
    async fn unknown_id_fails_without_calling_directory() {
        let directory = InMemoryShowtimeDirectory::new(many(2));
        let env = env_with(directory.clone(), 10);
        let mut state = BoardState::with_showtimes(many(2));

        let effects = BoardReducer::new().reduce(
            &mut state,
            BoardAction::SetStatus {
                id: ShowtimeId::new(9),
                status: ShowtimeStatus::Hidden,
            },
            &env,
        );

        assert_eq!(
            run_single(effects).await,
            Some(BoardAction::StatusUpdateFailed {
                id: ShowtimeId::new(9),
                error: DirectoryError::NotFound(ShowtimeId::new(9)),
            })
        );
        assert!(directory.calls().is_empty());
    }

    #[tokio::test]
    async fn set_status_effect_reports_updated_record() {
        let directory = InMemoryShowtimeDirectory::new(many(2));
        let env = env_with(directory, 10);
        let mut state = BoardState::with_showtimes(many(2));

        let effects = BoardReducer::new().reduce(
            &mut state,
            BoardAction::SetStatus {
                id: ShowtimeId::new(2),
                status: ShowtimeStatus::Hidden,
            },
            &env,
        );

        // Not optimistic
        assert!(state.get(ShowtimeId::new(2)).unwrap().is_scheduled());
        let Some(BoardAction::StatusUpdated { showtime }) = run_single(effects).await else {
            panic!("expected StatusUpdated");
        };
        assert_eq!(showtime.status, ShowtimeStatus::Hidden);
    }
}
