//! Weather forecast models

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of days in every forecast handed out by the platform
pub const FORECAST_DAYS: usize = 5;

const RAINY_CODES: &[&str] = &[
    "RAIN",
    "LIGHT_RAIN",
    "HEAVY_RAIN",
    "SCATTERED_SHOWERS",
    "SHOWERS",
    "THUNDERSTORM",
    "DRIZZLE",
];

const CLOUDY_CODES: &[&str] = &[
    "CLOUDY",
    "PARTLY_CLOUDY",
    "MOSTLY_CLOUDY",
    "OVERCAST",
    "FOG",
    "HAZE",
];

/// Coarse weather condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Rainy,
}

impl WeatherCondition {
    /// Classify a provider condition code such as `LIGHT_RAIN`.
    ///
    /// Rainy codes win over cloudy ones; anything unrecognized is sunny.
    pub fn classify(code: &str) -> Self {
        let code = code.to_ascii_uppercase();
        if RAINY_CODES.iter().any(|c| code.contains(c)) {
            WeatherCondition::Rainy
        } else if CLOUDY_CODES.iter().any(|c| code.contains(c)) {
            WeatherCondition::Cloudy
        } else {
            WeatherCondition::Sunny
        }
    }
}

/// Where a forecast came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ForecastSource {
    /// Live data from the upstream provider
    #[serde(rename = "google")]
    Live,
    /// Locally generated stand-in data
    #[serde(rename = "mock")]
    Synthetic,
}

/// One calendar day's weather summary for a division
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp: i32,
    pub max_temp: i32,
    pub min_temp: i32,
    pub humidity: i32,
    #[serde(rename = "rainProb")]
    pub rain_probability: i32,
    pub condition: WeatherCondition,
    pub description: String,
    pub wind_speed: f64,
    pub uv_index: i32,
    #[serde(rename = "thunderstormProb")]
    pub thunderstorm_probability: i32,
    pub cloud_cover: i32,
    #[serde(rename = "iconUrl")]
    pub icon_reference: Option<String>,
}

/// A five-day forecast tagged with its provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    pub source: ForecastSource,
    pub forecast: Vec<ForecastDay>,
}

/// Warnings shown alongside a forecast
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastAdvisories {
    pub rain_warning: bool,
    pub heat_warning: bool,
}

impl ForecastAdvisories {
    pub fn from_forecast(days: &[ForecastDay]) -> Self {
        Self {
            rain_warning: days.iter().any(|d| d.rain_probability > 60),
            heat_warning: days.iter().any(|d| d.temp > 35),
        }
    }
}

/// Generate a plausible monsoon-season forecast starting at `today`.
pub fn generate_synthetic_forecast<R: Rng>(rng: &mut R, today: NaiveDate) -> Vec<ForecastDay> {
    (0..FORECAST_DAYS as u64)
        .map(|offset| {
            let date = today.checked_add_days(Days::new(offset)).unwrap_or(today);
            let rain_probability = rng.gen_range(0..100);
            let max_temp: i32 = 28 + rng.gen_range(0..10);
            let min_temp = max_temp - rng.gen_range(3..8);

            let (condition, description) = if rain_probability > 60 {
                (WeatherCondition::Rainy, "Rain expected")
            } else if rain_probability > 30 {
                (WeatherCondition::Cloudy, "Partly cloudy")
            } else {
                (WeatherCondition::Sunny, "Clear skies")
            };

            ForecastDay {
                date,
                temp: (max_temp + min_temp) / 2,
                max_temp,
                min_temp,
                humidity: 60 + rng.gen_range(0..30),
                rain_probability,
                condition,
                description: description.to_string(),
                wind_speed: f64::from(5 + rng.gen_range(0..15)),
                uv_index: 3 + rng.gen_range(0..7),
                thunderstorm_probability: rng.gen_range(0..100),
                cloud_cover: rng.gen_range(0..100),
                icon_reference: None,
            }
        })
        .collect()
}
