//! WebAssembly module for HarvestGuard
//!
//! Provides client-side computation for:
//! - Weather condition classification and forecast warnings
//! - Spoilage risk assessment
//! - Dashboard counters
//! - Offline form validation

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("HarvestGuard toolkit ready"));
}

fn parse_json<T: serde::de::DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Classify a provider condition code as "sunny", "cloudy" or "rainy"
#[wasm_bindgen]
pub fn classify_weather_condition(code: &str) -> String {
    match WeatherCondition::classify(code) {
        WeatherCondition::Sunny => "sunny",
        WeatherCondition::Cloudy => "cloudy",
        WeatherCondition::Rainy => "rainy",
    }
    .to_string()
}

/// Rain and heat warnings for a forecast array
#[wasm_bindgen]
pub fn forecast_advisories(forecast_json: &str) -> Result<String, JsValue> {
    let days: Vec<ForecastDay> = parse_json("forecast", forecast_json)?;
    to_json(&ForecastAdvisories::from_forecast(&days))
}

/// Assess a batch list against a forecast; returns the assessments
#[wasm_bindgen]
pub fn assess_batch_risks(forecast_json: &str, batches_json: &str) -> Result<String, JsValue> {
    let days: Vec<ForecastDay> = parse_json("forecast", forecast_json)?;
    let batches: Vec<CropBatch> = parse_json("batches", batches_json)?;
    to_json(&assess_risks(&days, &batches))
}

/// Dashboard counters for a batch list
#[wasm_bindgen]
pub fn summarize_batches(batches_json: &str) -> Result<String, JsValue> {
    let batches: Vec<CropBatch> = parse_json("batches", batches_json)?;
    to_json(&BatchSummary::from_batches(&batches))
}

/// Reference coordinates of a division as `[latitude, longitude]`.
/// Unknown names resolve to Dhaka.
#[wasm_bindgen]
pub fn division_coordinates(name: &str) -> Vec<f64> {
    let c = Division::resolve(Some(name)).coordinates();
    vec![c.latitude, c.longitude]
}

/// Validate a batch weight entered in the add-crop form
#[wasm_bindgen]
pub fn validate_batch_weight(weight: f64) -> bool {
    Decimal::try_from(weight)
        .map(|w| validate_weight(w).is_ok())
        .unwrap_or(false)
}

/// Validate a Bangladeshi mobile number
#[wasm_bindgen]
pub fn validate_phone(phone: &str) -> bool {
    validate_bangladesh_phone(phone).is_ok()
}
