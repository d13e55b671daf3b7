//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// The block is moved into the future, so clone any `Arc` handles you need
/// before invoking the macro.
///
/// # Example
///
/// ```rust,ignore
/// use showtime_board_core::async_effect;
///
/// let directory = Arc::clone(&env.directory);
/// async_effect! {
///     match directory.list().await {
///         Ok(showtimes) => Some(BoardAction::Loaded { showtimes }),
///         Err(error) => Some(BoardAction::LoadFailed { error }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
