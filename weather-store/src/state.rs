//! Application state - single source of truth
//!
//! PATTERN: Snapshots are immutable
//! - The reducer receives `&Arc<AppState>` and never writes through it
//! - Every transition builds a new `AppState` with struct-update syntax
//! - Sequences are `im::Vector`, so untouched lists are shared between
//!   successive snapshots instead of copied

use im::Vector;
use serde::{Deserialize, Deserializer, Serialize};

/// City identifier as used by the weather provider
pub type CityId = u64;

/// Accepts a city id sent either as a JSON number or as a numeric string
pub fn deserialize_city_id<'de, D>(deserializer: D) -> Result<CityId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(CityId),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid city id {:?}", text))),
    }
}

/// Min/max/current reading on one temperature scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleReading {
    pub min: f64,
    pub max: f64,
    pub current: f64,
}

/// Temperature block shown for the current city
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Temperature {
    pub celsius: ScaleReading,
    pub fahrenheit: ScaleReading,
    pub weather_text: String,
}

/// The city currently displayed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCity {
    pub id: CityId,
    pub date: String,
    pub name: String,
    pub temperature: Temperature,
    /// `None` means unknown: favorites were replaced without a list to check
    pub is_favorite: Option<bool>,
}

/// Entry of the saved-cities list
///
/// Only `id` matters to the reducer. Every other field the client sent is
/// kept in `extra` and written back out unchanged when favorites persist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCity {
    #[serde(deserialize_with = "deserialize_city_id")]
    pub id: CityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FavoriteCity {
    pub fn new(id: CityId) -> Self {
        Self {
            id,
            name: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn named(id: CityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// Geographic position reported by the client
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Application state - everything the dashboard needs to render
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub current_city: CurrentCity,
    pub favorites: Vector<FavoriteCity>,
    /// Placeholder fetch lifecycle flags, never changed by the reducer
    pub loading: bool,
    pub loaded: bool,
    /// Opaque forecast entries
    pub forecast_days: Vector<serde_json::Value>,
    /// Opaque search results
    pub cities_found: Vector<serde_json::Value>,
    pub is_degrees_celsius: bool,
    pub is_theme_light: bool,
    pub is_err_modal_open: bool,
    pub err_msg: String,
    pub current_location: GeoPoint,
}

/// Min/max placeholders used by the initial snapshot and by every weather
/// update until the provider's daily range is wired in.
pub const PLACEHOLDER_MIN: f64 = 22.0;
pub const PLACEHOLDER_MAX: f64 = 30.0;

/// The fixed snapshot every store starts from
pub fn initial_state() -> AppState {
    AppState {
        current_city: CurrentCity {
            id: 215854,
            date: "01/01/20".into(),
            name: "Tel Aviv".into(),
            temperature: Temperature {
                celsius: ScaleReading {
                    min: PLACEHOLDER_MIN,
                    max: PLACEHOLDER_MAX,
                    current: 27.0,
                },
                fahrenheit: ScaleReading {
                    min: PLACEHOLDER_MIN,
                    max: PLACEHOLDER_MAX,
                    current: 0.0,
                },
                weather_text: "Tel Aviv".into(),
            },
            is_favorite: Some(false),
        },
        favorites: Vector::new(),
        loading: false,
        loaded: false,
        forecast_days: Vector::new(),
        cities_found: Vector::new(),
        is_degrees_celsius: true,
        is_theme_light: true,
        is_err_modal_open: false,
        err_msg: String::new(),
        current_location: GeoPoint::default(),
    }
}

impl Default for AppState {
    fn default() -> Self {
        initial_state()
    }
}
