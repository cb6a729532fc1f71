//! Freshness scanner models

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Verdict of a freshness scan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessVerdict {
    Fresh,
    Rotten,
}

/// Outcome of one scan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanResult {
    pub verdict: FreshnessVerdict,
    /// Confidence in percent
    pub confidence: u32,
}

/// Draw a simulated scan outcome. About 60% of scans come back fresh,
/// with a confidence between 75 and 94 percent.
pub fn draw_scan_result<R: Rng>(rng: &mut R) -> ScanResult {
    let verdict = if rng.gen::<f64>() > 0.4 {
        FreshnessVerdict::Fresh
    } else {
        FreshnessVerdict::Rotten
    };

    ScanResult {
        verdict,
        confidence: 75 + rng.gen_range(0..20),
    }
}
