//! Weather API client for fetching daily forecasts
//!
//! Integrates with the Google Weather `forecast/days:lookup` endpoint and
//! normalizes its day records into [`ForecastDay`]s.

use chrono::{DateTime, Days, FixedOffset, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use shared::{ForecastDay, GpsCoordinates, WeatherCondition, FORECAST_DAYS};

use crate::error::{AppError, AppResult};

/// Bangladesh Standard Time (UTC+6)
const BST_OFFSET_SECS: i32 = 6 * 3600;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Days-lookup API response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaysLookupResponse {
    #[serde(default)]
    pub forecast_days: Option<Vec<ProviderDay>>,
}

/// One forecast day as returned by the provider
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDay {
    #[serde(default)]
    pub interval: Option<ProviderInterval>,
    #[serde(default)]
    pub display_date: Option<ProviderDate>,
    #[serde(default)]
    pub max_temperature: Option<ProviderTemperature>,
    #[serde(default)]
    pub min_temperature: Option<ProviderTemperature>,
    #[serde(default)]
    pub daytime_forecast: Option<ProviderDaytime>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInterval {
    #[serde(default)]
    pub start_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderTemperature {
    #[serde(default)]
    pub degrees: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDaytime {
    #[serde(default)]
    pub relative_humidity: Option<f64>,
    #[serde(default)]
    pub precipitation: Option<ProviderPrecipitation>,
    #[serde(default)]
    pub weather_condition: Option<ProviderCondition>,
    #[serde(default)]
    pub wind: Option<ProviderWind>,
    #[serde(default)]
    pub uv_index: Option<f64>,
    #[serde(default)]
    pub thunderstorm_probability: Option<f64>,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderPrecipitation {
    #[serde(default)]
    pub probability: Option<ProviderPercent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderPercent {
    #[serde(default)]
    pub percent: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCondition {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<ProviderText>,
    #[serde(default)]
    pub icon_base_uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderText {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderWind {
    #[serde(default)]
    pub speed: Option<ProviderSpeed>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderSpeed {
    #[serde(default)]
    pub value: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, crate::config::DEFAULT_WEATHER_ENDPOINT.to_string())
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a five-day forecast for the given coordinates.
    ///
    /// Fails on transport errors, non-success status codes, unparseable
    /// bodies and responses with fewer than five days.
    pub async fn get_daily_forecast(
        &self,
        coordinates: GpsCoordinates,
        today: NaiveDate,
    ) -> AppResult<Vec<ForecastDay>> {
        let url = format!("{}/forecast/days:lookup", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.clone()),
                ("location.latitude", coordinates.latitude.to_string()),
                ("location.longitude", coordinates.longitude.to_string()),
                ("days", FORECAST_DAYS.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: DaysLookupResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse forecast response: {}", e))
        })?;

        convert_days_response(data, today)
    }
}

/// Convert a days-lookup response into exactly five forecast days
pub fn convert_days_response(
    data: DaysLookupResponse,
    today: NaiveDate,
) -> AppResult<Vec<ForecastDay>> {
    let days = data
        .forecast_days
        .ok_or_else(|| AppError::ExternalService("Forecast response has no days".to_string()))?;

    if days.len() < FORECAST_DAYS {
        return Err(AppError::ExternalService(format!(
            "Forecast response has {} days, expected {}",
            days.len(),
            FORECAST_DAYS
        )));
    }

    Ok(days
        .iter()
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(offset, day)| {
            let fallback = today
                .checked_add_days(Days::new(offset as u64))
                .unwrap_or(today);
            normalize_day(day, fallback)
        })
        .collect())
}

/// Map one provider day into our forecast record. Never fails: every
/// missing field takes a fixed default.
pub fn normalize_day(day: &ProviderDay, fallback_date: NaiveDate) -> ForecastDay {
    let daytime = day.daytime_forecast.as_ref();
    let condition = daytime.and_then(|d| d.weather_condition.as_ref());

    let max_temp = day
        .max_temperature
        .as_ref()
        .and_then(|t| t.degrees)
        .unwrap_or(30.0);
    let min_temp = day
        .min_temperature
        .as_ref()
        .and_then(|t| t.degrees)
        .unwrap_or(25.0);

    let humidity = daytime.and_then(|d| d.relative_humidity).unwrap_or(70.0);
    let rain_probability = daytime
        .and_then(|d| d.precipitation.as_ref())
        .and_then(|p| p.probability.as_ref())
        .and_then(|p| p.percent)
        .unwrap_or(0.0);
    let code = condition
        .and_then(|c| c.kind.as_deref())
        .unwrap_or("CLEAR");
    let description = condition
        .and_then(|c| c.description.as_ref())
        .and_then(|d| d.text.clone())
        .unwrap_or_else(|| "Clear".to_string());
    let wind_speed = daytime
        .and_then(|d| d.wind.as_ref())
        .and_then(|w| w.speed.as_ref())
        .and_then(|s| s.value)
        .unwrap_or(0.0);

    ForecastDay {
        date: day_date(day).unwrap_or(fallback_date),
        temp: round_half_up((max_temp + min_temp) / 2.0),
        max_temp: round_half_up(max_temp),
        min_temp: round_half_up(min_temp),
        humidity: round_half_up(humidity),
        rain_probability: round_half_up(rain_probability),
        condition: WeatherCondition::classify(code),
        description,
        wind_speed,
        uv_index: round_half_up(daytime.and_then(|d| d.uv_index).unwrap_or(0.0)),
        thunderstorm_probability: round_half_up(
            daytime.and_then(|d| d.thunderstorm_probability).unwrap_or(0.0),
        ),
        cloud_cover: round_half_up(daytime.and_then(|d| d.cloud_cover).unwrap_or(0.0)),
        icon_reference: condition
            .and_then(|c| c.icon_base_uri.as_ref())
            .map(|base| format!("{}.svg", base)),
    }
}

/// Calendar date of a provider day: the display date when given, otherwise
/// the interval start in Bangladesh local time.
fn day_date(day: &ProviderDay) -> Option<NaiveDate> {
    if let Some(d) = &day.display_date {
        if let Some(date) = NaiveDate::from_ymd_opt(d.year, d.month, d.day) {
            return Some(date);
        }
    }

    let start = day.interval.as_ref()?.start_time.as_deref()?;
    let offset = FixedOffset::east_opt(BST_OFFSET_SECS)?;
    DateTime::parse_from_rfc3339(start)
        .ok()
        .map(|t| t.with_timezone(&offset).date_naive())
}

/// Round half away from negative infinity, the way browsers round
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
