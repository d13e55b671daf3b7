//! # Showtime Board Testing
//!
//! Testing utilities for the showtime board.
//!
//! This crate provides:
//! - [`FixedClock`] and [`fixed_clock`] so temporal categories are deterministic
//! - [`ReducerTest`], a Given-When-Then builder for reducers
//! - Effect assertion helpers
//! - [`init_test_tracing`] to see runtime logs while debugging a test
//!
//! ## Example
//!
//! ```ignore
//! use showtime_board_testing::fixed_clock;
//!
//! #[tokio::test]
//! async fn sweep_hides_started_showtimes() {
//!     let env = board_environment(fixed_clock(2024, 6, 2, 10, 0));
//!     let store = Store::new(BoardState::default(), BoardReducer::new(), env);
//!     // ...
//! }
//! ```


use chrono::{DateTime, Utc};
use showtime_board_core::environment::Clock;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::TimeZone;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use showtime_board_testing::mocks::FixedClock;
    /// use showtime_board_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a fixed clock at the given UTC wall-clock minute
    ///
    /// Out-of-range components fall back to the Unix epoch so that a typo in
    /// a test shows up as a wrong date in assertion output.
    #[must_use]
    pub fn fixed_clock(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> FixedClock {
        let time = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        FixedClock::new(time)
    }

    /// Default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        fixed_clock(2025, 1, 1, 0, 0)
    }
}

/// Install a `tracing` fmt subscriber honouring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, fixed_clock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
