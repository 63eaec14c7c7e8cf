//! wx-dispatch: Redux-style state management over persistent snapshots
//!
//! Reducers take `&Arc<S>` and hand back a [`Transition`]: either the same
//! snapshot or a new one, plus effects for the host to carry out.
//!
//! # Example
//! ```ignore
//! use wx_dispatch::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum MyAction {
//!     NextItem,
//!     PrevItem,
//! }
//! ```

// Re-export everything from core
pub use wx_dispatch_core::*;

// Re-export derive macros
pub use wx_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    pub use wx_dispatch_core::prelude::*;

    // Derive macros
    pub use wx_dispatch_macros::Action;
}
