//! Centralized snapshot store with reducer pattern
//!
//! The store owns the current snapshot as an `Arc<S>`. Every dispatch hands
//! that snapshot to the reducer and replaces it with whatever the reducer
//! returns. Previous snapshots stay valid and untouched for anyone still
//! holding them.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::middleware::Middleware;
use crate::transition::{Reducer, Transition};
use crate::Action;

/// Result of dispatching an action to a [`Store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the reducer produced a new snapshot.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No new snapshot and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Snapshot store with a Redux-like reducer
///
/// # Type Parameters
/// * `S` - The application state type
/// * `A` - The action type (must implement `Action`)
/// * `E` - The effect type emitted by the reducer
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use wx_dispatch_core::{Action, Store, Transition};
///
/// #[derive(Clone, Debug)]
/// enum Msg { Bump, Ignore }
///
/// impl Action for Msg {
///     fn name(&self) -> &'static str {
///         match self {
///             Msg::Bump => "Bump",
///             Msg::Ignore => "Ignore",
///         }
///     }
/// }
///
/// fn reducer(state: &Arc<u32>, action: Msg) -> Transition<u32, ()> {
///     match action {
///         Msg::Bump => Transition::next(**state + 1),
///         Msg::Ignore => Transition::unchanged(state),
///     }
/// }
///
/// let mut store = Store::new(0, reducer);
/// assert!(store.dispatch(Msg::Bump).changed);
/// assert!(!store.dispatch(Msg::Ignore).changed);
/// assert_eq!(**store.state(), 1);
/// ```
pub struct Store<S, A, E> {
    state: Arc<S>,
    reducer: Reducer<S, A, E>,
    _marker: PhantomData<A>,
}

impl<S, A: Action, E> Store<S, A, E> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A, E>) -> Self {
        Self::from_snapshot(Arc::new(state), reducer)
    }

    /// Create a store around an existing snapshot
    pub fn from_snapshot(state: Arc<S>, reducer: Reducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Current snapshot
    #[inline]
    pub fn state(&self) -> &Arc<S> {
        &self.state
    }

    /// Cloned handle to the current snapshot
    #[inline]
    pub fn snapshot(&self) -> Arc<S> {
        Arc::clone(&self.state)
    }

    /// Dispatch an action to the store
    ///
    /// `changed` is false exactly when the reducer returned the same
    /// allocation it was given.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        let Transition { state, effects } = (self.reducer)(&self.state, action);
        let changed = !Arc::ptr_eq(&self.state, &state);
        self.state = state;
        DispatchResult { changed, effects }
    }
}

/// Store with middleware support
///
/// Wraps a [`Store`] and calls middleware hooks before and after each
/// dispatch. Middleware sees the action and the change flag, not the effects.
pub struct StoreWithMiddleware<S, A: Action, E, M: Middleware<A>> {
    store: Store<S, A, E>,
    middleware: M,
}

impl<S, A: Action, E, M: Middleware<A>> StoreWithMiddleware<S, A, E, M> {
    /// Create a new store with middleware
    pub fn new(state: S, reducer: Reducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Wrap an existing store
    pub fn from_store(store: Store<S, A, E>, middleware: M) -> Self {
        Self { store, middleware }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }

    #[inline]
    pub fn state(&self) -> &Arc<S> {
        self.store.state()
    }

    #[inline]
    pub fn snapshot(&self) -> Arc<S> {
        self.store.snapshot()
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }
}
