//! Effects - side effects declared by the reducer
//!
//! Effects are returned from the reducer and handled by the host.
//! This keeps the reducer pure while making storage writes explicit.

use im::Vector;
use wx_dispatch::KeyValueStore;

use crate::favorites::FAVORITES_KEY;
use crate::state::FavoriteCity;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the full favorites list to local storage
    PersistFavorites { favorites: Vector<FavoriteCity> },
}

/// Apply an effect against local storage.
///
/// Storage is best effort: a failed write is logged and otherwise ignored,
/// the state that produced the effect stays as it is.
pub fn apply_effect<K: KeyValueStore>(effect: Effect, store: &mut K) {
    match effect {
        Effect::PersistFavorites { favorites } => match store.put_json(FAVORITES_KEY, &favorites) {
            Ok(()) => tracing::debug!(count = favorites.len(), "Persisted favorites"),
            Err(e) => tracing::warn!(error = %e, "Failed to persist favorites"),
        },
    }
}
