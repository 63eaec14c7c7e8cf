//! Core traits and types for wx-dispatch
//!
//! Redux-style state management over persistent snapshots. A reducer never
//! mutates the state it is given: it returns either the same `Arc` (nothing
//! happened) or a new one. Side effects are described as values and carried
//! out by the host after the reducer returns.
//!
//! # Core Concepts
//!
//! - **Action**: A request for a state transition
//! - **Transition**: Successor snapshot plus declared effects
//! - **Store**: Holds the current snapshot and applies the reducer
//! - **Middleware**: Hooks around dispatch (logging)
//! - **KeyValueStore**: Persistence port used by effect handlers
//! - **EffectRuntime**: Async action queue driving a store
//!
//! # Basic Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wx_dispatch_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum MyAction {
//!     Increment,
//!     Save,
//! }
//!
//! enum Effect {
//!     Persist(i32),
//! }
//!
//! fn reducer(state: &Arc<i32>, action: MyAction) -> Transition<i32, Effect> {
//!     match action {
//!         MyAction::Increment => Transition::next(**state + 1),
//!         MyAction::Save => Transition::unchanged(state).with(Effect::Persist(**state)),
//!     }
//! }
//!
//! let mut store = Store::new(0, reducer);
//! store.dispatch(MyAction::Increment);
//! ```

pub mod action;
pub mod middleware;
pub mod persist;
#[cfg(feature = "runtime")]
pub mod runtime;
pub mod store;
pub mod testing;
pub mod transition;

// Core trait exports
pub use action::{Action, ActionSummary};

// Store exports
pub use middleware::{LoggingMiddleware, Middleware, NoopMiddleware};
pub use store::{DispatchResult, Store, StoreWithMiddleware};
pub use transition::{Reducer, Transition};

// Persistence exports
pub use persist::{JsonFileStore, KeyValueStore, MemoryStore, PersistError};

// Runtime exports (requires "runtime" feature)
#[cfg(feature = "runtime")]
pub use runtime::{EffectContext, EffectRuntime};

// Testing exports
pub use testing::StoreHarness;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionSummary};
    pub use crate::middleware::{LoggingMiddleware, Middleware, NoopMiddleware};
    pub use crate::persist::{JsonFileStore, KeyValueStore, MemoryStore, PersistError};
    #[cfg(feature = "runtime")]
    pub use crate::runtime::{EffectContext, EffectRuntime};
    pub use crate::store::{DispatchResult, Store, StoreWithMiddleware};
    pub use crate::transition::{Reducer, Transition};
}
