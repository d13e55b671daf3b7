//! The showtime board: state, actions and reducer.
//!
//! One [`BoardState`] per admin session, driven through a
//! [`showtime_board_runtime::Store`] by the [`BoardReducer`].

mod actions;
mod reducer;
mod state;

pub use actions::BoardAction;
pub use reducer::{BoardEnvironment, BoardReducer};
pub use state::BoardState;
