//! Behavioural properties of the weather reducer
//!
//! PATTERN: StoreHarness
//! - Wrap the reducer in a harness
//! - Dispatch a sequence of actions
//! - Inspect snapshots and recorded effects

use std::sync::Arc;

use im::Vector;
use wx_dispatch::testing::StoreHarness;
use wx_dispatch::{assert_effect, assert_no_effects, count_effects};
use weather_store::action::{Action, CurrentConditions};
use weather_store::effect::Effect;
use weather_store::state::{initial_state, AppState, FavoriteCity};
use weather_store::{reduce, reducer};

fn harness() -> StoreHarness<AppState, Action, Effect> {
    StoreHarness::new(initial_state(), reducer)
}

fn every_handled_action() -> Vec<Action> {
    vec![
        Action::AddToFav {
            city: FavoriteCity::new(1),
        },
        Action::RemoveFromFav {
            city: FavoriteCity::new(1),
        },
        Action::SetFavorites { favorites: None },
        Action::GetForecastDays,
        Action::SetForecastDays {
            forecast_days: Vector::new(),
        },
        Action::SetSearchResult {
            cities: Vector::new(),
        },
        Action::RemoveCitiesFound,
        Action::SetCityName {
            name: "Haifa".into(),
            id: 2,
            is_favorite: None,
        },
        Action::GetCityWeatherByIdSuccess {
            city: CurrentConditions::new(1.0, 34.0, "Fog"),
        },
        Action::ChangeDegrees,
        Action::ChangeTheme,
        Action::ToggleModalOn { err: "x".into() },
        Action::ToggleModalOff { err: "x".into() },
        Action::SetCurrentLocation {
            latitude: 1.0,
            longitude: 2.0,
        },
    ]
}

#[test]
fn test_unknown_action_returns_identical_snapshot() {
    let mut harness = harness();
    harness.dispatch(Action::ChangeTheme);
    let before = Arc::clone(harness.state());

    let result = harness.dispatch(Action::Unknown);

    assert!(!result.changed);
    assert!(Arc::ptr_eq(&before, harness.state()));
    assert_no_effects!(harness);
}

#[test]
fn test_unknown_kind_from_the_wire_is_identity() {
    let state = Arc::new(initial_state());
    let action: Action = serde_json::from_str(r#"{"type":"[Auth] login","user":"x"}"#).unwrap();

    let next = reducer(&state, action).state;

    assert!(Arc::ptr_eq(&state, &next));
}

#[test]
fn test_every_handled_action_produces_a_new_snapshot() {
    for action in every_handled_action() {
        let state = Arc::new(initial_state());
        let name = format!("{:?}", action);
        let next = reducer(&state, action).state;
        assert!(!Arc::ptr_eq(&state, &next), "{name} reused the snapshot");
        assert_eq!(*state, initial_state(), "{name} mutated its input");
    }
}

#[test]
fn test_missing_state_starts_from_initial() {
    let from_none = reduce(None, Action::SetCurrentLocation {
        latitude: 5.0,
        longitude: 6.0,
    })
    .state;
    let from_initial = reducer(&Arc::new(initial_state()), Action::SetCurrentLocation {
        latitude: 5.0,
        longitude: 6.0,
    })
    .state;

    assert_eq!(*from_none, *from_initial);
}

#[test]
fn test_add_then_remove_restores_favorites() {
    let mut harness = harness();
    harness.dispatch(Action::AddToFav {
        city: FavoriteCity::new(4),
    });
    let before = harness.state().favorites.clone();

    harness.dispatch(Action::AddToFav {
        city: FavoriteCity::named(9, "Nazareth"),
    });
    harness.dispatch(Action::RemoveFromFav {
        city: FavoriteCity::new(9),
    });

    assert_eq!(harness.state().favorites, before);
}

#[test]
fn test_favorites_changes_persist_exactly_once_each() {
    let mut harness = harness();
    harness.dispatch_all([
        Action::AddToFav {
            city: FavoriteCity::new(4),
        },
        Action::ChangeTheme,
        Action::RemoveFromFav {
            city: FavoriteCity::new(4),
        },
        Action::SetFavorites {
            favorites: Some(Vector::from(vec![FavoriteCity::new(4)])),
        },
    ]);

    assert_eq!(count_effects!(harness, Effect::PersistFavorites { .. }), 2);
    assert_effect!(harness, Effect::PersistFavorites { favorites } if favorites.is_empty());
}

#[test]
fn test_set_favorites_recomputes_membership() {
    let with_seven = || Some(Vector::from(vec![FavoriteCity::new(7)]));

    let mut harness = harness();
    harness.dispatch(Action::SetCityName {
        name: "Seven".into(),
        id: 7,
        is_favorite: Some(false),
    });
    harness.dispatch(Action::SetFavorites {
        favorites: with_seven(),
    });
    assert_eq!(harness.state().current_city.is_favorite, Some(true));

    harness.dispatch(Action::SetCityName {
        name: "Nine".into(),
        id: 9,
        is_favorite: Some(true),
    });
    harness.dispatch(Action::SetFavorites {
        favorites: with_seven(),
    });
    assert_eq!(harness.state().current_city.is_favorite, Some(false));
}

#[test]
fn test_change_degrees_twice_is_round_trip() {
    let mut harness = harness();
    let original = harness.state().is_degrees_celsius;

    harness.dispatch(Action::ChangeDegrees);
    assert_ne!(harness.state().is_degrees_celsius, original);
    harness.dispatch(Action::ChangeDegrees);
    assert_eq!(harness.state().is_degrees_celsius, original);
}

#[test]
fn test_closing_modal_keeps_payload_message() {
    let mut harness = harness();
    harness.dispatch(Action::ToggleModalOn { err: "X".into() });
    harness.dispatch(Action::ToggleModalOff { err: "X".into() });

    assert!(!harness.state().is_err_modal_open);
    assert_eq!(harness.state().err_msg, "X");
}

#[test]
fn test_weather_success_from_provider_json() {
    let action: Action = serde_json::from_str(
        r#"{
            "type": "getCityWeatherByIdSuccess",
            "city": {
                "WeatherText": "Partly sunny",
                "Temperature": {
                    "Metric": {"Value": 18, "Unit": "C"},
                    "Imperial": {"Value": 64, "Unit": "F"}
                }
            }
        }"#,
    )
    .unwrap();

    let mut harness = harness();
    harness.dispatch(action);

    let temp = &harness.state().current_city.temperature;
    assert_eq!(temp.celsius.current, 18.0);
    assert_eq!(temp.fahrenheit.current, 64.0);
    for scale in [temp.celsius, temp.fahrenheit] {
        assert_eq!(scale.min, 22.0);
        assert_eq!(scale.max, 30.0);
    }
    assert_eq!(temp.weather_text, "Partly sunny");
}

#[test]
fn test_unrelated_action_keeps_other_fields() {
    let mut harness = harness();
    harness.dispatch(Action::SetSearchResult {
        cities: (0..100).map(|i| serde_json::json!({ "Key": i })).collect(),
    });
    harness.dispatch(Action::ChangeTheme);

    let history = harness.history();
    let (a, b) = (&history[1], &history[2]);
    assert!(!Arc::ptr_eq(a, b));
    assert_eq!(a.cities_found, b.cities_found);
    assert_eq!(a.current_city, b.current_city);
    assert_ne!(a.is_theme_light, b.is_theme_light);
}
