//! Reducer output: the successor snapshot plus declared effects
//!
//! Reducers in wx-dispatch never mutate state in place. They receive the
//! current snapshot behind an `Arc` and hand back either that very `Arc`
//! (no-op) or a freshly allocated successor. Callers detect no-ops with
//! `Arc::ptr_eq`, which is what the store uses for its `changed` flag.

use std::sync::Arc;

/// A reducer over persistent snapshots.
///
/// Takes the current snapshot and an action, returns the next snapshot and
/// any effects the host must perform.
pub type Reducer<S, A, E> = fn(&Arc<S>, A) -> Transition<S, E>;

/// The result of applying one action to one snapshot.
#[derive(Debug, Clone)]
pub struct Transition<S, E> {
    /// Successor snapshot. Same allocation as the input when nothing changed.
    pub state: Arc<S>,
    /// Effects to be processed by the host, in order.
    pub effects: Vec<E>,
}

impl<S, E> Transition<S, E> {
    /// Keep the current snapshot, by reference.
    #[inline]
    pub fn unchanged(state: &Arc<S>) -> Self {
        Self {
            state: Arc::clone(state),
            effects: vec![],
        }
    }

    /// Move to a newly built snapshot.
    #[inline]
    pub fn next(state: S) -> Self {
        Self {
            state: Arc::new(state),
            effects: vec![],
        }
    }

    /// Add an effect to this transition.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// True when `self.state` is a different allocation than `prev`.
    #[inline]
    pub fn is_change_from(&self, prev: &Arc<S>) -> bool {
        !Arc::ptr_eq(prev, &self.state)
    }
}
