//! Action trait for type-safe state transitions

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to a store
///
/// Actions describe a requested transition. They should be:
/// - Clone: Actions may be logged, replayed, or handed to middleware
/// - Debug: For logging
/// - Send + 'static: So they can travel through the runtime's action queue
///
/// Use `#[derive(Action)]` from `wx-dispatch-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;

    /// Optional grouping used by logging middleware
    fn category(&self) -> Option<&'static str> {
        None
    }
}

/// Compact, human-readable rendering of an action for logs
///
/// The default is the `Debug` output. Override it for actions that carry
/// large payloads (lists, API responses) so log lines stay short.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
