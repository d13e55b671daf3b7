//! # Showtime Board
//!
//! Filtering, pagination, selection and lifecycle engine for the cinema admin
//! board.
//!
//! The board reads showtimes from a remote [`directory::ShowtimeDirectory`],
//! annotates them with movie and room names from a
//! [`catalog::CatalogDirectory`], and derives what the admin sees:
//!
//! - [`filter::FilterEngine`] ANDs search, status and temporal category
//! - [`types::ListingView`] narrows the result to scheduled or hidden
//! - [`pagination::paginate`] slices it into pages
//! - [`selection::SelectionSet`] tracks bulk selection on the current page
//!
//! Status changes, the expiry sweep and deletes go through the directory.
//! All of it runs as a reducer ([`board::BoardReducer`]) inside a
//! [`showtime_board_runtime::Store`], wrapped by [`admin::ShowtimeAdmin`].
//!
//! ## Example
//!
//! ```ignore
//! use showtime_board::{BoardConfig, ShowtimeAdmin, InMemoryShowtimeDirectory, InMemoryCatalog};
//! use showtime_board_core::environment::SystemClock;
//!
//! let admin = ShowtimeAdmin::from_config(
//!     &BoardConfig::from_env(),
//!     Arc::new(SystemClock),
//!     InMemoryShowtimeDirectory::new(seed).shared(),
//!     InMemoryCatalog::new().shared(),
//! );
//!
//! admin.refresh().await?;
//! admin.set_search("avengers").await;
//! let page = admin.current_page().await;
//! ```

pub mod admin;
pub mod board;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod pagination;
pub mod selection;
pub mod text;
pub mod types;

pub use admin::{BoardStore, ShowtimeAdmin};
pub use board::{BoardAction, BoardEnvironment, BoardReducer, BoardState};
pub use calendar::{DateWindow, ScheduleCalendar};
pub use catalog::{CatalogDirectory, InMemoryCatalog, MovieSummary, RoomSummary};
pub use config::BoardConfig;
pub use directory::{InMemoryShowtimeDirectory, NewShowtime, ShowtimeDirectory, ShowtimePatch};
pub use error::{BoardError, DirectoryError, ParseFilterError};
pub use filter::{FilterCache, FilterEngine};
pub use lifecycle::SweepReport;
pub use pagination::{Page, paginate};
pub use selection::SelectionSet;
pub use types::{
    DateFilter, Filters, ListingView, MovieRef, RoomRef, Showtime, ShowtimeId, ShowtimeStatus,
    StatusFilter,
};
