//! Risk report: forecast advisories plus per-batch spoilage risk

use serde::Serialize;
use shared::{
    annotate_batches, assess_risks, CropBatch, Forecast, ForecastAdvisories, ForecastSource,
    RiskAssessment,
};

/// Everything the risk dashboard shows for one division
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub source: ForecastSource,
    pub advisories: ForecastAdvisories,
    pub assessments: Vec<RiskAssessment>,
    /// Active batches with their risk fields attached
    pub batches: Vec<CropBatch>,
}

/// Assess `batches` against `forecast`. Stored batches are not modified.
pub fn build_report(forecast: &Forecast, batches: &[CropBatch]) -> RiskReport {
    let assessments = assess_risks(&forecast.forecast, batches);
    let annotated = annotate_batches(batches, &assessments);

    RiskReport {
        source: forecast.source,
        advisories: ForecastAdvisories::from_forecast(&forecast.forecast),
        assessments,
        batches: annotated,
    }
}
