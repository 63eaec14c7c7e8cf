//! Saved-cities list helpers
//!
//! These are pure. Writing the list to local storage is the host's job,
//! requested through [`Effect::PersistFavorites`](crate::effect::Effect).

use im::Vector;
use wx_dispatch::KeyValueStore;

use crate::state::{CityId, FavoriteCity};

/// Storage key holding the JSON-encoded favorites list
pub const FAVORITES_KEY: &str = "favorites";

/// Copy of `favorites` with `city` appended. Duplicates are allowed.
pub fn add_favorite(favorites: &Vector<FavoriteCity>, city: FavoriteCity) -> Vector<FavoriteCity> {
    let mut next = favorites.clone();
    next.push_back(city);
    next
}

/// Copy of `favorites` without any entry whose id equals `city.id`.
pub fn remove_favorite(favorites: &Vector<FavoriteCity>, city: &FavoriteCity) -> Vector<FavoriteCity> {
    favorites
        .iter()
        .filter(|entry| entry.id != city.id)
        .cloned()
        .collect()
}

/// Whether `city_id` is in `favorites`.
///
/// With no list at all the answer is unknown (`None`), which callers keep
/// distinct from a definite `Some(false)`.
pub fn is_favorite(favorites: Option<&Vector<FavoriteCity>>, city_id: CityId) -> Option<bool> {
    favorites.map(|list| list.iter().any(|entry| entry.id == city_id))
}

/// Read the persisted favorites list.
///
/// Returns `None` when nothing is stored, or when the stored value cannot be
/// read or decoded (logged).
pub fn load_favorites<K>(store: &K) -> Option<Vector<FavoriteCity>>
where
    K: KeyValueStore + ?Sized,
{
    let raw = match store.get(FAVORITES_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read stored favorites");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(favorites) => Some(favorites),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed stored favorites");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wx_dispatch::MemoryStore;

    fn list(ids: &[CityId]) -> Vector<FavoriteCity> {
        ids.iter().copied().map(FavoriteCity::new).collect()
    }

    #[test]
    fn test_add_appends_without_touching_input() {
        let before = list(&[1, 2]);
        let after = add_favorite(&before, FavoriteCity::new(3));

        assert_eq!(before, list(&[1, 2]));
        assert_eq!(after, list(&[1, 2, 3]));
    }

    #[test]
    fn test_add_allows_duplicates() {
        let after = add_favorite(&list(&[5]), FavoriteCity::new(5));
        assert_eq!(after, list(&[5, 5]));
    }

    #[test]
    fn test_remove_drops_every_matching_id() {
        let before = list(&[5, 1, 5, 2]);
        let after = remove_favorite(&before, &FavoriteCity::named(5, "whatever"));

        assert_eq!(after, list(&[1, 2]));
        assert_eq!(before.len(), 4);
    }

    #[test]
    fn test_remove_missing_id_is_equal_copy() {
        let before = list(&[1, 2]);
        assert_eq!(remove_favorite(&before, &FavoriteCity::new(9)), before);
    }

    #[test]
    fn test_is_favorite_tri_state() {
        let favorites = list(&[7]);
        assert_eq!(is_favorite(Some(&favorites), 7), Some(true));
        assert_eq!(is_favorite(Some(&favorites), 9), Some(false));
        assert_eq!(is_favorite(Some(&Vector::new()), 7), Some(false));
        assert_eq!(is_favorite(None, 7), None);
    }

    #[test]
    fn test_load_favorites() {
        let mut store = MemoryStore::new();
        assert_eq!(load_favorites(&store), None);

        store
            .put(FAVORITES_KEY, r#"[{"id":7,"name":"Eilat"},{"id":8}]"#.into())
            .unwrap();
        assert_eq!(
            load_favorites(&store),
            Some(Vector::from(vec![
                FavoriteCity::named(7, "Eilat"),
                FavoriteCity::new(8)
            ]))
        );
    }

    #[test]
    fn test_load_favorites_ignores_garbage() {
        let mut store = MemoryStore::new();
        store.put(FAVORITES_KEY, "{not json".into()).unwrap();
        assert_eq!(load_favorites(&store), None);
    }
}
