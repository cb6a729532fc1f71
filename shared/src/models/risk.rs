//! Spoilage risk assessment
//!
//! Joins a five-day forecast with the active crop batches and estimates, per
//! batch, a coarse risk level and the hours left before critical loss (ETCL).
//! The assessment is read-only: it never changes a batch's status.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CropBatch, ForecastDay, StorageType};

/// Coarse spoilage risk
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Risk estimate for one active batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub batch_id: Uuid,
    pub risk_level: RiskLevel,
    pub estimated_time_to_critical_loss_hours: u32,
}

/// Forecast aggregates the risk rules are expressed over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastOutlook {
    pub avg_humidity: f64,
    pub avg_temp: f64,
    pub max_rain: i32,
}

impl ForecastOutlook {
    /// Returns `None` for an empty forecast.
    pub fn from_forecast(days: &[ForecastDay]) -> Option<Self> {
        let max_rain = days.iter().map(|d| d.rain_probability).max()?;
        let n = days.len() as f64;

        Some(Self {
            avg_humidity: days.iter().map(|d| f64::from(d.humidity)).sum::<f64>() / n,
            avg_temp: days.iter().map(|d| f64::from(d.temp)).sum::<f64>() / n,
            max_rain,
        })
    }

    /// Risk level and ETCL before storage is taken into account
    pub fn base_risk(&self) -> (RiskLevel, u32) {
        if self.avg_humidity > 80.0 && self.avg_temp > 32.0 {
            (RiskLevel::High, 72)
        } else if self.avg_humidity > 70.0 || self.max_rain > 70 {
            (RiskLevel::Medium, 120)
        } else {
            (RiskLevel::Low, 168)
        }
    }

    /// Risk level and ETCL for a batch kept in `storage`
    pub fn risk_for(&self, storage: StorageType) -> (RiskLevel, u32) {
        adjust_for_storage(self.base_risk(), storage)
    }
}

/// Open-field storage halves the ETCL and lifts low risk to medium.
/// Risk is never lowered by storage.
pub fn adjust_for_storage((level, etcl): (RiskLevel, u32), storage: StorageType) -> (RiskLevel, u32) {
    match storage {
        StorageType::OpenField => (level.max(RiskLevel::Medium), etcl / 2),
        StorageType::Silo | StorageType::JuteBag => (level, etcl),
    }
}

/// Assess every active batch against the forecast.
///
/// Inactive batches are skipped entirely. An empty forecast or no active
/// batches yields an empty set.
pub fn assess_risks(forecast: &[ForecastDay], batches: &[CropBatch]) -> Vec<RiskAssessment> {
    let Some(outlook) = ForecastOutlook::from_forecast(forecast) else {
        return Vec::new();
    };

    batches
        .iter()
        .filter(|b| b.is_active())
        .map(|batch| {
            let (risk_level, etcl) = outlook.risk_for(batch.storage_type);
            RiskAssessment {
                batch_id: batch.id,
                risk_level,
                estimated_time_to_critical_loss_hours: etcl,
            }
        })
        .collect()
}

/// Copies of the assessed batches with their transient risk fields filled in
pub fn annotate_batches(batches: &[CropBatch], assessments: &[RiskAssessment]) -> Vec<CropBatch> {
    assessments
        .iter()
        .filter_map(|a| {
            batches.iter().find(|b| b.id == a.batch_id).map(|b| CropBatch {
                risk_level: Some(a.risk_level),
                etcl: Some(a.estimated_time_to_critical_loss_hours),
                ..b.clone()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatchStatus, CropType, NewCropBatch, WeatherCondition};
    use crate::types::Division;
    use chrono::{NaiveDate, Utc};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn forecast(humidity: i32, temp: i32, rain: i32) -> Vec<ForecastDay> {
        (0..5)
            .map(|i| ForecastDay {
                date: NaiveDate::from_ymd_opt(2024, 7, 1 + i).unwrap(),
                temp,
                max_temp: temp + 3,
                min_temp: temp - 3,
                humidity,
                rain_probability: rain,
                condition: WeatherCondition::Cloudy,
                description: "Cloudy".to_string(),
                wind_speed: 8.0,
                uv_index: 5,
                thunderstorm_probability: 0,
                cloud_cover: 50,
                icon_reference: None,
            })
            .collect()
    }

    fn batch(storage_type: StorageType) -> CropBatch {
        CropBatch::new(
            NewCropBatch {
                crop_type: CropType::Wheat,
                weight: Decimal::from(120),
                harvest_date: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
                division: Division::Dhaka,
                district: "Gazipur".to_string(),
                storage_type,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_high_risk_in_silo() {
        let silo = batch(StorageType::Silo);
        let result = assess_risks(&forecast(85, 33, 20), &[silo.clone()]);
        assert_eq!(
            result,
            vec![RiskAssessment {
                batch_id: silo.id,
                risk_level: RiskLevel::High,
                estimated_time_to_critical_loss_hours: 72,
            }]
        );
    }

    #[test]
    fn test_high_risk_in_open_field_halves_etcl_only() {
        let result = assess_risks(&forecast(85, 33, 20), &[batch(StorageType::OpenField)]);
        assert_eq!(result[0].risk_level, RiskLevel::High);
        assert_eq!(result[0].estimated_time_to_critical_loss_hours, 36);
    }

    #[test]
    fn test_low_risk_in_open_field_is_upgraded() {
        let result = assess_risks(&forecast(60, 28, 20), &[batch(StorageType::OpenField)]);
        assert_eq!(result[0].risk_level, RiskLevel::Medium);
        assert_eq!(result[0].estimated_time_to_critical_loss_hours, 84);
    }

    #[test]
    fn test_medium_risk_from_rain_alone() {
        let mut days = forecast(60, 28, 10);
        days[2].rain_probability = 71;
        let result = assess_risks(&days, &[batch(StorageType::JuteBag)]);
        assert_eq!(result[0].risk_level, RiskLevel::Medium);
        assert_eq!(result[0].estimated_time_to_critical_loss_hours, 120);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly 80% humidity and 32°C is not high
        let result = assess_risks(&forecast(80, 32, 70), &[batch(StorageType::Silo)]);
        assert_eq!(result[0].risk_level, RiskLevel::Medium);

        let result = assess_risks(&forecast(70, 35, 70), &[batch(StorageType::Silo)]);
        assert_eq!(result[0].risk_level, RiskLevel::Low);
        assert_eq!(result[0].estimated_time_to_critical_loss_hours, 168);
    }

    #[test]
    fn test_inactive_batches_are_excluded() {
        let mut lost = batch(StorageType::Silo);
        lost.status = BatchStatus::Lost;
        let mut completed = batch(StorageType::Silo);
        completed.status = BatchStatus::Completed;
        let active = batch(StorageType::Silo);

        let result = assess_risks(&forecast(60, 28, 20), &[lost, active.clone(), completed]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].batch_id, active.id);
    }

    #[test]
    fn test_empty_inputs_yield_empty_set() {
        assert!(assess_risks(&[], &[batch(StorageType::Silo)]).is_empty());
        assert!(assess_risks(&forecast(90, 35, 90), &[]).is_empty());
    }

    #[test]
    fn test_annotate_batches() {
        let batches = vec![batch(StorageType::Silo), batch(StorageType::OpenField)];
        let assessments = assess_risks(&forecast(60, 28, 20), &batches);
        let annotated = annotate_batches(&batches, &assessments);

        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].risk_level, Some(RiskLevel::Low));
        assert_eq!(annotated[0].etcl, Some(168));
        assert_eq!(annotated[1].risk_level, Some(RiskLevel::Medium));
        assert_eq!(annotated[1].etcl, Some(84));
        // Originals are untouched
        assert!(batches.iter().all(|b| b.risk_level.is_none()));
    }

    proptest! {
        #[test]
        fn prop_storage_never_lowers_risk(
            humidity in 0i32..=100,
            temp in 15i32..45,
            rain in 0i32..=100,
        ) {
            let days = forecast(humidity, temp, rain);
            let outlook = ForecastOutlook::from_forecast(&days).unwrap();
            let (base_level, base_etcl) = outlook.base_risk();

            for storage in [StorageType::Silo, StorageType::JuteBag, StorageType::OpenField] {
                let (level, etcl) = outlook.risk_for(storage);
                prop_assert!(level >= base_level);
                prop_assert!(etcl <= base_etcl);
                if base_level == RiskLevel::High {
                    prop_assert_eq!(level, RiskLevel::High);
                }
            }
        }

        #[test]
        fn prop_one_assessment_per_active_batch(active in 0usize..6, lost in 0usize..6) {
            let mut batches: Vec<_> = (0..active).map(|_| batch(StorageType::Silo)).collect();
            for _ in 0..lost {
                let mut b = batch(StorageType::OpenField);
                b.status = BatchStatus::Lost;
                batches.push(b);
            }
            prop_assert_eq!(assess_risks(&forecast(75, 30, 40), &batches).len(), active);
        }
    }
}
