//! # Showtime Board Runtime
//!
//! Runtime implementation for the showtime board.
//!
//! This crate provides the [`Store`] that owns the board state, runs the
//! reducer, and executes the effects it returns.
//!
//! ## Core Components
//!
//! - **Store**: single logical writer for the state; actions are reduced one at a time
//! - **Effect Executor**: spawns effect futures and feeds produced actions back
//! - **`EffectHandle`**: lets a caller wait for an action's whole effect cascade
//! - **Action broadcast**: every action fed back by an effect, for observers
//!
//! ## Example
//!
//! ```ignore
//! use showtime_board_runtime::Store;
//!
//! let store = Store::new(BoardState::default(), BoardReducer::new(), environment);
//!
//! // Send an action and wait until the refetch it triggers has landed
//! let mut handle = store.send(BoardAction::Refresh).await;
//! handle.wait().await;
//!
//! // Read state
//! let count = store.state(|s| s.showtimes.len()).await;
//! ```

use showtime_board_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{RwLock, broadcast, mpsc, watch};

/// Default capacity of the action broadcast channel
pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

pub use store::Store;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`]. Tracking is cascading: effects started by
/// actions that were fed back from this action's effects are counted too, so
/// [`EffectHandle::wait`] returns only once the whole chain has settled.
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new<A>(collector: Option<mpsc::UnboundedSender<A>>) -> (Self, EffectTracking<A>) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };
        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
            collector,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    #[must_use]
    pub fn completed() -> Self {
        let (handle, _tracking) = Self::new::<()>(None);
        handle
    }

    /// Number of effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects (and the effects of their feedback actions) to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Internal: tracking context shared by every effect in one cascade
struct EffectTracking<A> {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
    /// Receives every action the cascade feeds back, when a caller collects
    collector: Option<mpsc::UnboundedSender<A>>,
}

impl<A> Clone for EffectTracking<A> {
    fn clone(&self) -> Self {
        Self {
            counter: Arc::clone(&self.counter),
            notifier: Arc::clone(&self.notifier),
            collector: self.collector.clone(),
        }
    }
}

impl<A> EffectTracking<A> {
    fn record(&self, action: &A)
    where
        A: Clone,
    {
        if let Some(collector) = &self.collector {
            let _ = collector.send(action.clone());
        }
    }

    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            // Counter reached zero, notify waiters
            let _ = self.notifier.send(());
        }
    }
}

/// Decrements the tracking counter when dropped, even if the effect panicked
struct DecrementGuard<A>(EffectTracking<A>);

impl<A> Drop for DecrementGuard<A> {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Store module - the runtime coordinator
pub mod store {
    use super::{
        Arc, DEFAULT_BROADCAST_CAPACITY, DecrementGuard, Effect, EffectHandle, EffectTracking,
        Reducer, RwLock, broadcast, mpsc,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the reducer is the only writer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Reducer calls are serialized by the write lock. Effects run on spawned
    /// tasks with no timeout or retry of their own; those belong to the
    /// collaborators the effects call.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        /// Every action produced by an effect is broadcast before it is reduced.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(
                initial_state,
                reducer,
                environment,
                DEFAULT_BROADCAST_CAPACITY,
            )
        }

        /// Create a new store with a custom action broadcast capacity
        ///
        /// A capacity of zero is raised to one.
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer under the write lock, starts the returned effects
        /// and returns without waiting for them.
        #[tracing::instrument(skip_all, name = "store_send")]
        pub async fn send(&self, action: A) -> EffectHandle {
            let (handle, tracking) = EffectHandle::new(None);
            self.send_internal(action, &tracking).await;
            handle
        }

        /// Send an action, wait for its effect cascade, and return every action
        /// the cascade fed back, in the order they were produced
        ///
        /// Only this cascade's actions are returned; concurrent senders never
        /// interleave and the action broadcast capacity does not apply.
        pub async fn send_and_collect(&self, action: A) -> Vec<A> {
            let (collector, mut collected) = mpsc::unbounded_channel();
            let (mut handle, tracking) = EffectHandle::new(Some(collector));
            self.send_internal(action, &tracking).await;
            drop(tracking);
            handle.wait().await;

            // Every effect records before its guard drops, so the cascade is complete
            let mut actions = Vec::new();
            while let Ok(action) = collected.try_recv() {
                actions.push(action);
            }
            actions
        }

        /// Subscribe to every action produced by effects, across all senders
        ///
        /// A receiver that falls more than the broadcast capacity behind gets
        /// `RecvError::Lagged` and skips ahead.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let hidden = store.state(|s| s.hidden_count()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        async fn send_internal(&self, action: A, tracking: &EffectTracking<A>) {
            metrics::counter!("store.actions.total").increment(1);

            let effects = {
                let mut state = self.state.write().await;
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();
                self.reducer.reduce(&mut *state, action, &self.environment)
            };

            tracing::trace!(count = effects.len(), "Reducer completed");
            for effect in effects {
                self.execute_effect(effect, tracking);
            }
        }

        fn execute_effect(&self, effect: Effect<A>, tracking: &EffectTracking<A>) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Parallel(effects) => {
                    tracing::trace!(count = effects.len(), "Executing Effect::Parallel");
                    for effect in effects {
                        self.execute_effect(effect, tracking);
                    }
                },
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    tracking.increment();

                    let guard = DecrementGuard(tracking.clone());
                    let store = self.clone();

                    tokio::spawn(async move {
                        let guard = guard;
                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, feeding back");
                            guard.0.record(&action);
                            let _ = store.action_broadcast.send(action.clone());
                            // Children register on the same counter before this guard drops
                            store.send_internal(action, &guard.0).await;
                        }
                    });
                },
            }
        }
    }
}
