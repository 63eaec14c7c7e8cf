//! Actions understood by the weather reducer
//!
//! PATTERN: One variant per action kind, typed payloads
//! - Wire form is `{"type": "<kind>", ...payload}` with camelCase fields
//! - Kinds this build does not know decode to `Action::Unknown`
//! - Required payload fields are rejected when missing; optional ones
//!   default here, so the reducer never sees half-formed payloads

use im::Vector;
use serde::{Deserialize, Serialize};
use wx_dispatch::ActionSummary;

use crate::state::{deserialize_city_id, CityId, FavoriteCity};

/// Current-conditions record from the weather provider (PascalCase on the wire)
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentConditions {
    #[serde(default)]
    pub temperature: Readings,
    #[serde(default)]
    pub weather_text: String,
}

/// The same temperature on both scales
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Readings {
    #[serde(default)]
    pub metric: Measurement,
    #[serde(default)]
    pub imperial: Measurement,
}

/// A single reading; a missing value decodes as NaN
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Measurement {
    #[serde(default = "missing_reading")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

fn missing_reading() -> f64 {
    f64::NAN
}

impl Default for Measurement {
    fn default() -> Self {
        Self {
            value: missing_reading(),
            unit: None,
        }
    }
}

impl Measurement {
    pub fn new(value: f64) -> Self {
        Self { value, unit: None }
    }
}

impl CurrentConditions {
    /// Conditions with the given metric/imperial values
    pub fn new(metric: f64, imperial: f64, weather_text: impl Into<String>) -> Self {
        Self {
            temperature: Readings {
                metric: Measurement::new(metric),
                imperial: Measurement::new(imperial),
            },
            weather_text: weather_text.into(),
        }
    }
}

/// Weather dashboard actions
#[derive(wx_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    // ===== Favorites =====
    #[action(rename = "addToFav", category = "favorites")]
    AddToFav { city: FavoriteCity },

    #[action(rename = "removeFromFav", category = "favorites")]
    RemoveFromFav { city: FavoriteCity },

    /// Replace the favorites list; `None` keeps the current one
    #[action(rename = "setFavorites", category = "favorites")]
    SetFavorites {
        #[serde(default)]
        favorites: Option<Vector<FavoriteCity>>,
    },

    // ===== Forecast =====
    /// Intent: forecast fetch started, clears the previous days
    #[action(rename = "getForecastDays", category = "forecast")]
    GetForecastDays,

    #[action(rename = "setForecastDays", category = "forecast")]
    SetForecastDays {
        forecast_days: Vector<serde_json::Value>,
    },

    // ===== Search =====
    #[action(rename = "setSearchResult", category = "search")]
    SetSearchResult { cities: Vector<serde_json::Value> },

    #[action(rename = "removeCitiesFound", category = "search")]
    RemoveCitiesFound,

    // ===== City =====
    #[action(rename = "setCityName", category = "city")]
    SetCityName {
        name: String,
        #[serde(deserialize_with = "deserialize_city_id")]
        id: CityId,
        #[serde(default)]
        is_favorite: Option<bool>,
    },

    /// Result: current conditions loaded for the displayed city
    #[action(rename = "getCityWeatherByIdSuccess", category = "city")]
    GetCityWeatherByIdSuccess { city: CurrentConditions },

    // ===== Display preferences =====
    #[action(rename = "changeDegrees", category = "display")]
    ChangeDegrees,

    #[action(rename = "changeTheme", category = "display")]
    ChangeTheme,

    // ===== Error modal =====
    #[action(rename = "toggleModalOn", category = "modal")]
    ToggleModalOn {
        #[serde(default)]
        err: String,
    },

    #[action(rename = "toggleModalOff", category = "modal")]
    ToggleModalOff {
        #[serde(default)]
        err: String,
    },

    // ===== Location =====
    #[action(rename = "setCurrentLocation", category = "location")]
    SetCurrentLocation { latitude: f64, longitude: f64 },

    /// Any kind this reducer does not handle
    #[serde(other)]
    Unknown,
}

/// Compact log lines for list-carrying actions
impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::SetFavorites { favorites: Some(f) } => {
                format!("setFavorites {{ {} entries }}", f.len())
            }
            Action::SetForecastDays { forecast_days } => {
                format!("setForecastDays {{ {} days }}", forecast_days.len())
            }
            Action::SetSearchResult { cities } => {
                format!("setSearchResult {{ {} cities }}", cities.len())
            }
            Action::GetCityWeatherByIdSuccess { city } => format!(
                "getCityWeatherByIdSuccess {{ {}°C / {}°F }}",
                city.temperature.metric.value, city.temperature.imperial.value
            ),
            _ => format!("{:?}", self),
        }
    }
}
