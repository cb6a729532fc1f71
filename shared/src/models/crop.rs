//! Crop batch models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RiskLevel;
use crate::types::Division;

/// Crops tracked by the platform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Rice,
    Wheat,
}

impl CropType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Rice => "rice",
            CropType::Wheat => "wheat",
        }
    }
}

/// How a harvested batch is stored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StorageType {
    Silo,
    JuteBag,
    OpenField,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Silo => "silo",
            StorageType::JuteBag => "juteBag",
            StorageType::OpenField => "openField",
        }
    }
}

/// Lifecycle status of a batch. Only ever changed by an explicit update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    #[default]
    Active,
    Completed,
    Lost,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Active => "active",
            BatchStatus::Completed => "completed",
            BatchStatus::Lost => "lost",
        }
    }
}

/// A harvested crop batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropBatch {
    pub id: Uuid,
    pub crop_type: CropType,
    /// Weight in kilograms
    pub weight: Decimal,
    pub harvest_date: NaiveDate,
    pub division: Division,
    pub district: String,
    pub storage_type: StorageType,
    pub status: BatchStatus,
    pub created_at: DateTime<Utc>,
    /// Attached by risk assessment for presentation only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    /// Estimated hours to critical loss, attached with `risk_level`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etcl: Option<u32>,
}

impl CropBatch {
    /// Build a fresh batch from user input. New batches are always active.
    pub fn new(input: NewCropBatch, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            crop_type: input.crop_type,
            weight: input.weight,
            harvest_date: input.harvest_date,
            division: input.division,
            district: input.district,
            storage_type: input.storage_type,
            status: BatchStatus::Active,
            created_at,
            risk_level: None,
            etcl: None,
        }
    }

    /// Merge a partial update into this batch. Status transitions are not
    /// checked: any status may move to any other.
    pub fn apply(&mut self, update: CropBatchUpdate) {
        if let Some(crop_type) = update.crop_type {
            self.crop_type = crop_type;
        }
        if let Some(weight) = update.weight {
            self.weight = weight;
        }
        if let Some(harvest_date) = update.harvest_date {
            self.harvest_date = harvest_date;
        }
        if let Some(division) = update.division {
            self.division = division;
        }
        if let Some(district) = update.district {
            self.district = district;
        }
        if let Some(storage_type) = update.storage_type {
            self.storage_type = storage_type;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BatchStatus::Active
    }
}

/// Input for registering a new batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCropBatch {
    pub crop_type: CropType,
    pub weight: Decimal,
    pub harvest_date: NaiveDate,
    pub division: Division,
    #[serde(default)]
    pub district: String,
    pub storage_type: StorageType,
}

/// Partial update for a batch; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropBatchUpdate {
    pub crop_type: Option<CropType>,
    pub weight: Option<Decimal>,
    pub harvest_date: Option<NaiveDate>,
    pub division: Option<Division>,
    pub district: Option<String>,
    pub storage_type: Option<StorageType>,
    pub status: Option<BatchStatus>,
}

/// Dashboard counters over the whole collection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub lost: usize,
    /// Share of completed batches, rounded to a whole percent
    pub success_rate: u32,
}

impl BatchSummary {
    pub fn from_batches(batches: &[CropBatch]) -> Self {
        let count = |status: BatchStatus| batches.iter().filter(|b| b.status == status).count();
        let total = batches.len();
        let completed = count(BatchStatus::Completed);
        let success_rate = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        };

        Self {
            total,
            active: count(BatchStatus::Active),
            completed,
            lost: count(BatchStatus::Lost),
            success_rate,
        }
    }
}
