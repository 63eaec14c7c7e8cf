//! Weather dashboard state, built on wx-dispatch
//!
//! The dashboard's whole client state is one [`AppState`](state::AppState)
//! snapshot. Every dispatched [`Action`](action::Action) goes through
//! [`reducer`](reducer::reducer), which returns the next snapshot plus any
//! [`Effect`](effect::Effect)s; the only effect is writing the favorites
//! list to local storage.

pub mod action;
pub mod config;
pub mod effect;
pub mod favorites;
pub mod host;
pub mod logging;
pub mod reducer;
pub mod state;

pub use action::Action;
pub use effect::Effect;
pub use reducer::{reduce, reducer};
pub use state::{initial_state, AppState};
