//! Test utilities for wx-dispatch reducers
//!
//! - [`StoreHarness`]: wraps a [`Store`] and records every emitted effect
//! - [`assert_effect!`](crate::assert_effect) / [`assert_no_effects!`](crate::assert_no_effects)
//!
//! # Example
//!
//! ```ignore
//! use wx_dispatch::testing::StoreHarness;
//! use wx_dispatch::assert_effect;
//!
//! let mut harness = StoreHarness::new(AppState::default(), reducer);
//! harness.dispatch(Action::Save);
//! assert_effect!(harness, Effect::Persist { .. });
//! ```

use std::sync::Arc;

use crate::store::{DispatchResult, Store};
use crate::transition::Reducer;
use crate::Action;

/// Store wrapper that keeps every snapshot and effect for inspection.
pub struct StoreHarness<S, A: Action, E> {
    store: Store<S, A, E>,
    history: Vec<Arc<S>>,
    effects: Vec<E>,
}

impl<S, A: Action, E: Clone> StoreHarness<S, A, E> {
    pub fn new(state: S, reducer: Reducer<S, A, E>) -> Self {
        Self::from_snapshot(Arc::new(state), reducer)
    }

    pub fn from_snapshot(state: Arc<S>, reducer: Reducer<S, A, E>) -> Self {
        Self {
            history: vec![Arc::clone(&state)],
            store: Store::from_snapshot(state, reducer),
            effects: Vec::new(),
        }
    }

    /// Dispatch and record the resulting snapshot and effects.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        let result = self.store.dispatch(action);
        self.history.push(self.store.snapshot());
        self.effects.extend(result.effects.iter().cloned());
        result
    }

    /// Dispatch several actions in order.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    pub fn state(&self) -> &Arc<S> {
        self.store.state()
    }

    /// Every snapshot so far, starting with the initial one.
    pub fn history(&self) -> &[Arc<S>] {
        &self.history
    }

    /// Effects recorded since the last drain.
    pub fn effects(&self) -> &[E] {
        &self.effects
    }

    /// Take the recorded effects.
    pub fn drain_effects(&mut self) -> Vec<E> {
        std::mem::take(&mut self.effects)
    }
}

/// Assert that a harness recorded an effect matching a pattern.
///
/// ```ignore
/// assert_effect!(harness, Effect::PersistFavorites { .. });
/// ```
#[macro_export]
macro_rules! assert_effect {
    ($harness:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $harness
                .effects()
                .iter()
                .any(|e| matches!(e, $pattern $(if $guard)?)),
            "Expected effect matching `{}`, got: {:?}",
            stringify!($pattern),
            $harness.effects()
        );
    };
}

/// Assert that a harness recorded no effects.
#[macro_export]
macro_rules! assert_no_effects {
    ($harness:expr) => {
        assert!(
            $harness.effects().is_empty(),
            "Expected no effects, got: {:?}",
            $harness.effects()
        );
    };
}

/// Count recorded effects matching a pattern.
#[macro_export]
macro_rules! count_effects {
    ($harness:expr, $pattern:pat) => {
        $harness
            .effects()
            .iter()
            .filter(|e| matches!(e, $pattern))
            .count()
    };
}
