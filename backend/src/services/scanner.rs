//! Simulated crop freshness scanner

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{draw_scan_result, ScanResult};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ScannerService {
    delay: Duration,
    rng: Arc<Mutex<StdRng>>,
}

impl ScannerService {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Arc::new(Mutex::new(rng));
        self
    }

    /// Analyze an uploaded photo. The image content is not inspected.
    pub async fn analyze(&self, image: &[u8]) -> AppResult<ScanResult> {
        if image.is_empty() {
            return Err(AppError::invalid("image", "Image is required"));
        }

        tracing::debug!("Analyzing {} byte image", image.len());
        tokio::time::sleep(self.delay).await;

        let result = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            draw_scan_result(&mut *rng)
        };
        tracing::info!("Scan result: {:?} ({}%)", result.verdict, result.confidence);
        Ok(result)
    }
}
