//! Crop batch collection with persistence and export

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use shared::validation::{validate_batch_update, validate_new_batch};
use shared::{BatchSummary, CropBatch, CropBatchUpdate, NewCropBatch};
use uuid::Uuid;

use super::storage::{keys, load_json, save_json, KeyValueStore};
use crate::error::{AppError, AppResult};

pub const CSV_FILENAME: &str = "harvestguard-crops.csv";
pub const JSON_FILENAME: &str = "harvestguard-crops.json";

const CSV_HEADER: [&str; 9] = [
    "ID",
    "Crop Type",
    "Weight (kg)",
    "Harvest Date",
    "Division",
    "District",
    "Storage Type",
    "Status",
    "Created At",
];

/// Ordered collection of crop batches. Every mutation rewrites the whole
/// collection to storage.
pub struct CropStore {
    store: Arc<dyn KeyValueStore>,
    batches: Vec<CropBatch>,
}

impl CropStore {
    /// Load the persisted collection, starting empty when nothing is stored
    pub fn load(store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let batches: Vec<CropBatch> = load_json(store.as_ref(), keys::CROPS)?.unwrap_or_default();
        tracing::debug!("Loaded {} crop batches", batches.len());
        Ok(Self { store, batches })
    }

    pub fn list(&self) -> &[CropBatch] {
        &self.batches
    }

    /// Register a new batch, always as active
    pub fn add(&mut self, input: NewCropBatch) -> AppResult<CropBatch> {
        validate_new_batch(&input).map_err(|msg| AppError::invalid("weight", msg))?;

        let batch = CropBatch::new(input, Utc::now());
        let mut next = self.batches.clone();
        next.push(batch.clone());
        self.commit(next)?;

        tracing::info!("Added crop batch {} ({})", batch.id, batch.crop_type.as_str());
        Ok(batch)
    }

    /// Merge `update` into the batch with `id`. Unknown ids are a no-op and
    /// return `None`.
    pub fn update(&mut self, id: Uuid, update: CropBatchUpdate) -> AppResult<Option<CropBatch>> {
        validate_batch_update(&update).map_err(|msg| AppError::invalid("weight", msg))?;

        let Some(index) = self.batches.iter().position(|b| b.id == id) else {
            tracing::debug!("Update for unknown crop batch {}", id);
            return Ok(None);
        };
        let mut next = self.batches.clone();
        next[index].apply(update);
        let updated = next[index].clone();

        self.commit(next)?;
        Ok(Some(updated))
    }

    /// Remove the batch with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> AppResult<bool> {
        if !self.batches.iter().any(|b| b.id == id) {
            return Ok(false);
        }

        let next = self.batches.iter().filter(|b| b.id != id).cloned().collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Drop every batch
    pub fn clear(&mut self) -> AppResult<()> {
        self.commit(Vec::new())
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_batches(&self.batches)
    }

    /// Export all batches as CSV with a fixed header row
    pub fn export_csv(&self) -> AppResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(CSV_HEADER)
            .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;

        for batch in &self.batches {
            writer
                .write_record([
                    batch.id.to_string(),
                    batch.crop_type.as_str().to_string(),
                    batch.weight.to_string(),
                    batch.harvest_date.to_string(),
                    batch.division.name().to_string(),
                    batch.district.clone(),
                    batch.storage_type.as_str().to_string(),
                    batch.status.as_str().to_string(),
                    batch.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                ])
                .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))
    }

    /// Export all batches as pretty-printed JSON
    pub fn export_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&self.batches)?)
    }

    /// Write `next` to the store, then adopt it. A failed write leaves the
    /// in-memory collection untouched.
    fn commit(&mut self, next: Vec<CropBatch>) -> AppResult<()> {
        save_json(self.store.as_ref(), keys::CROPS, &next)?;
        self.batches = next;
        Ok(())
    }
}
