//! HTTP handlers for crop batch management

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared::{BatchSummary, CropBatch, CropBatchUpdate, NewCropBatch};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::crop::{CSV_FILENAME, JSON_FILENAME};
use crate::AppState;

/// List all crop batches
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropBatch>> {
    Json(state.session.read().await.crops().list().to_vec())
}

/// Register a harvested batch
pub async fn create_crop(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<NewCropBatch>,
) -> AppResult<(StatusCode, Json<CropBatch>)> {
    tracing::debug!("User {} adding a {} batch", user.id, input.crop_type.as_str());
    let batch = state.session.write().await.add_crop(input)?;
    Ok((StatusCode::CREATED, Json(batch)))
}

/// Update a batch. Unknown ids change nothing and answer 204.
pub async fn update_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
    Json(update): Json<CropBatchUpdate>,
) -> AppResult<Response> {
    let updated = state.session.write().await.update_crop(crop_id, update)?;
    Ok(match updated {
        Some(batch) => Json(batch).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// Delete a batch. Unknown ids are not an error.
pub async fn delete_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.session.write().await.delete_crop(crop_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Dashboard counters
pub async fn crop_summary(State(state): State<AppState>) -> Json<BatchSummary> {
    Json(state.session.read().await.crops().summary())
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

/// Download every batch as a CSV or JSON attachment
pub async fn export_crops(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let session = state.session.read().await;
    let (body, content_type, filename) = match query.format {
        ExportFormat::Csv => (session.crops().export_csv()?, "text/csv", CSV_FILENAME),
        ExportFormat::Json => (
            session.crops().export_json()?,
            "application/json",
            JSON_FILENAME,
        ),
    };

    let disposition = format!("attachment; filename=\"{}\"", filename);
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
