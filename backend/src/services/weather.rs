//! Weather gateway: live forecasts with a synthetic fallback

use std::sync::{Arc, Mutex};

use chrono::{FixedOffset, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{generate_synthetic_forecast, Division, Forecast, ForecastSource};

use crate::config::WeatherConfig;
use crate::external::weather::WeatherClient;

/// Weather service. Always produces a five-day forecast: without an API key,
/// or when the provider fails in any way, it answers with synthetic data.
#[derive(Clone)]
pub struct WeatherService {
    weather_client: Option<WeatherClient>,
    rng: Arc<Mutex<StdRng>>,
}

impl WeatherService {
    pub fn new(weather_client: Option<WeatherClient>) -> Self {
        Self {
            weather_client,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    pub fn from_config(config: &WeatherConfig) -> Self {
        let client = config
            .credential()
            .map(|key| WeatherClient::with_base_url(key.to_string(), config.api_endpoint.clone()));
        if client.is_none() {
            tracing::warn!("No weather API key configured, forecasts will be synthetic");
        }
        Self::new(client)
    }

    /// Replace the randomness source used for synthetic forecasts
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Arc::new(Mutex::new(rng));
        self
    }

    pub fn has_live_provider(&self) -> bool {
        self.weather_client.is_some()
    }

    /// Forecast for `division` starting today in Bangladesh
    pub async fn get_forecast(&self, division: Division) -> Forecast {
        self.get_forecast_on(division, today_in_bangladesh()).await
    }

    pub async fn get_forecast_on(&self, division: Division, today: NaiveDate) -> Forecast {
        if let Some(client) = &self.weather_client {
            match client.get_daily_forecast(division.coordinates(), today).await {
                Ok(days) => {
                    tracing::debug!("Live forecast for {}", division);
                    return Forecast {
                        source: ForecastSource::Live,
                        forecast: days,
                    };
                }
                Err(e) => {
                    tracing::warn!("Forecast for {} falling back to synthetic data: {}", division, e);
                }
            }
        }

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        Forecast {
            source: ForecastSource::Synthetic,
            forecast: generate_synthetic_forecast(&mut *rng, today),
        }
    }
}

/// Current calendar date at UTC+6
pub fn today_in_bangladesh() -> NaiveDate {
    match FixedOffset::east_opt(6 * 3600) {
        Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
        None => Utc::now().date_naive(),
    }
}
