//! Reducer - pure function: (snapshot, action) -> (snapshot, effects)
//!
//! PATTERN: Reducer over persistent snapshots
//! - fn(state: &Arc<AppState>, action: Action) -> Transition
//! - Handled actions build a new `AppState`; the old one is never touched
//! - Unhandled actions return the very same `Arc`
//! - Storage writes are returned as effects, not performed here

use std::sync::Arc;

use wx_dispatch::Transition;

use crate::action::{Action, CurrentConditions};
use crate::effect::Effect;
use crate::favorites::{add_favorite, is_favorite, remove_favorite};
use crate::state::{
    initial_state, AppState, CurrentCity, GeoPoint, ScaleReading, Temperature, PLACEHOLDER_MAX,
    PLACEHOLDER_MIN,
};

pub type WeatherTransition = Transition<AppState, Effect>;

/// Reduce from an optional snapshot.
///
/// With no snapshot the fixed initial state is used, then the action is
/// applied to it.
pub fn reduce(state: Option<&Arc<AppState>>, action: Action) -> WeatherTransition {
    match state {
        Some(state) => reducer(state, action),
        None => reducer(&Arc::new(initial_state()), action),
    }
}

/// The reducer handles all state transitions
pub fn reducer(state: &Arc<AppState>, action: Action) -> WeatherTransition {
    match action {
        // ===== Favorites =====
        Action::AddToFav { city } => {
            let favorites = add_favorite(&state.favorites, city);
            Transition::next(AppState {
                favorites: favorites.clone(),
                current_city: with_favorite_flag(state, Some(true)),
                ..AppState::clone(state)
            })
            .with(Effect::PersistFavorites { favorites })
        }

        Action::RemoveFromFav { city } => {
            let favorites = remove_favorite(&state.favorites, &city);
            Transition::next(AppState {
                favorites: favorites.clone(),
                current_city: with_favorite_flag(state, Some(false)),
                ..AppState::clone(state)
            })
            .with(Effect::PersistFavorites { favorites })
        }

        Action::SetFavorites { favorites } => {
            // Membership is checked against the payload, not the kept list
            let flag = is_favorite(favorites.as_ref(), state.current_city.id);
            Transition::next(AppState {
                favorites: favorites.unwrap_or_else(|| state.favorites.clone()),
                current_city: with_favorite_flag(state, flag),
                ..AppState::clone(state)
            })
        }

        // ===== Forecast =====
        Action::GetForecastDays => Transition::next(AppState {
            forecast_days: Default::default(),
            ..AppState::clone(state)
        }),

        Action::SetForecastDays { forecast_days } => Transition::next(AppState {
            forecast_days,
            ..AppState::clone(state)
        }),

        // ===== Search =====
        Action::SetSearchResult { cities } => Transition::next(AppState {
            cities_found: cities,
            ..AppState::clone(state)
        }),

        Action::RemoveCitiesFound => Transition::next(AppState {
            cities_found: Default::default(),
            ..AppState::clone(state)
        }),

        // ===== City =====
        Action::SetCityName {
            name,
            id,
            is_favorite,
        } => Transition::next(AppState {
            current_city: CurrentCity {
                name,
                id,
                is_favorite,
                ..state.current_city.clone()
            },
            ..AppState::clone(state)
        }),

        Action::GetCityWeatherByIdSuccess { city } => Transition::next(AppState {
            current_city: CurrentCity {
                temperature: temperature_from(city),
                ..state.current_city.clone()
            },
            ..AppState::clone(state)
        }),

        // ===== Display preferences =====
        Action::ChangeDegrees => Transition::next(AppState {
            is_degrees_celsius: !state.is_degrees_celsius,
            ..AppState::clone(state)
        }),

        Action::ChangeTheme => Transition::next(AppState {
            is_theme_light: !state.is_theme_light,
            ..AppState::clone(state)
        }),

        // ===== Error modal =====
        Action::ToggleModalOn { err } => Transition::next(AppState {
            is_err_modal_open: true,
            err_msg: err,
            ..AppState::clone(state)
        }),

        // errMsg is taken from the payload on close as well
        Action::ToggleModalOff { err } => Transition::next(AppState {
            is_err_modal_open: false,
            err_msg: err,
            ..AppState::clone(state)
        }),

        // ===== Location =====
        Action::SetCurrentLocation {
            latitude,
            longitude,
        } => Transition::next(AppState {
            current_location: GeoPoint {
                latitude,
                longitude,
            },
            ..AppState::clone(state)
        }),

        Action::Unknown => Transition::unchanged(state),
    }
}

fn with_favorite_flag(state: &AppState, is_favorite: Option<bool>) -> CurrentCity {
    CurrentCity {
        is_favorite,
        ..state.current_city.clone()
    }
}

/// Only the current reading comes from the provider; min/max stay at the
/// placeholder range on both scales.
fn temperature_from(city: CurrentConditions) -> Temperature {
    Temperature {
        celsius: ScaleReading {
            min: PLACEHOLDER_MIN,
            max: PLACEHOLDER_MAX,
            current: city.temperature.metric.value,
        },
        fahrenheit: ScaleReading {
            min: PLACEHOLDER_MIN,
            max: PLACEHOLDER_MAX,
            current: city.temperature.imperial.value,
        },
        weather_text: city.weather_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FavoriteCity;
    use im::Vector;

    fn start() -> Arc<AppState> {
        Arc::new(initial_state())
    }

    #[test]
    fn test_add_to_fav_marks_current_and_persists() {
        let state = start();

        let t = reducer(&state, Action::AddToFav {
            city: FavoriteCity::new(215854),
        });

        assert_eq!(t.state.favorites, Vector::from(vec![FavoriteCity::new(215854)]));
        assert_eq!(t.state.current_city.is_favorite, Some(true));
        assert_eq!(
            t.effects,
            vec![Effect::PersistFavorites {
                favorites: t.state.favorites.clone()
            }]
        );
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_remove_from_fav_clears_flag_and_persists() {
        let state = reducer(&start(), Action::AddToFav {
            city: FavoriteCity::new(3),
        })
        .state;

        let t = reducer(&state, Action::RemoveFromFav {
            city: FavoriteCity::new(3),
        });

        assert!(t.state.favorites.is_empty());
        assert_eq!(t.state.current_city.is_favorite, Some(false));
        assert_eq!(t.effects.len(), 1);
    }

    #[test]
    fn test_set_favorites_without_list_keeps_list_and_flag_unknown() {
        let state = reducer(&start(), Action::AddToFav {
            city: FavoriteCity::new(1),
        })
        .state;

        let t = reducer(&state, Action::SetFavorites { favorites: None });

        assert_eq!(t.state.favorites, state.favorites);
        assert_eq!(t.state.current_city.is_favorite, None);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_forecast_reset_and_replace() {
        let days: Vector<serde_json::Value> =
            Vector::from(vec![serde_json::json!({"Date": "mon"}), serde_json::json!({"Date": "tue"})]);

        let loaded = reducer(&start(), Action::SetForecastDays {
            forecast_days: days.clone(),
        })
        .state;
        assert_eq!(loaded.forecast_days, days);

        let reset = reducer(&loaded, Action::GetForecastDays).state;
        assert!(reset.forecast_days.is_empty());
    }

    #[test]
    fn test_search_results_set_and_cleared() {
        let found = reducer(&start(), Action::SetSearchResult {
            cities: Vector::from(vec![serde_json::json!({"LocalizedName": "Haifa"})]),
        })
        .state;
        assert_eq!(found.cities_found.len(), 1);

        let cleared = reducer(&found, Action::RemoveCitiesFound).state;
        assert!(cleared.cities_found.is_empty());
    }

    #[test]
    fn test_set_city_name_keeps_other_city_fields() {
        let state = start();

        let t = reducer(&state, Action::SetCityName {
            name: "Haifa".into(),
            id: 213181,
            is_favorite: Some(true),
        });

        let city = &t.state.current_city;
        assert_eq!(city.name, "Haifa");
        assert_eq!(city.id, 213181);
        assert_eq!(city.is_favorite, Some(true));
        assert_eq!(city.date, state.current_city.date);
        assert_eq!(city.temperature, state.current_city.temperature);
    }

    #[test]
    fn test_change_theme_toggles() {
        let state = start();
        let once = reducer(&state, Action::ChangeTheme).state;
        assert!(!once.is_theme_light);
        let twice = reducer(&once, Action::ChangeTheme).state;
        assert!(twice.is_theme_light);
    }

    #[test]
    fn test_toggle_modal_on_sets_message() {
        let t = reducer(&start(), Action::ToggleModalOn { err: "boom".into() });
        assert!(t.state.is_err_modal_open);
        assert_eq!(t.state.err_msg, "boom");
    }

    #[test]
    fn test_set_current_location_replaces_pair() {
        let t = reducer(&start(), Action::SetCurrentLocation {
            latitude: 32.08,
            longitude: 34.78,
        });
        assert_eq!(
            t.state.current_location,
            GeoPoint {
                latitude: 32.08,
                longitude: 34.78
            }
        );
    }

    #[test]
    fn test_weather_success_uses_placeholder_range() {
        let t = reducer(&start(), Action::GetCityWeatherByIdSuccess {
            city: CurrentConditions::new(18.0, 64.0, "Sunny"),
        });

        let temp = &t.state.current_city.temperature;
        assert_eq!(
            temp.celsius,
            ScaleReading {
                min: 22.0,
                max: 30.0,
                current: 18.0,
            }
        );
        assert_eq!(
            temp.fahrenheit,
            ScaleReading {
                min: 22.0,
                max: 30.0,
                current: 64.0,
            }
        );
        assert_eq!(temp.weather_text, "Sunny");
        assert_eq!(t.state.current_city.name, "Tel Aviv");
    }

    #[test]
    fn test_unknown_returns_same_snapshot() {
        let state = start();
        let t = reducer(&state, Action::Unknown);
        assert!(Arc::ptr_eq(&state, &t.state));
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_handled_actions_always_allocate() {
        let state = start();
        let t = reducer(&state, Action::RemoveCitiesFound);
        assert!(t.is_change_from(&state));
        assert_eq!(*t.state, *state);
    }

    #[test]
    fn test_reduce_without_state_starts_from_initial() {
        let t = reduce(None, Action::ChangeDegrees);
        assert!(!t.state.is_degrees_celsius);
        assert_eq!(t.state.current_city, initial_state().current_city);

        let t = reduce(None, Action::Unknown);
        assert_eq!(*t.state, initial_state());
    }
}
