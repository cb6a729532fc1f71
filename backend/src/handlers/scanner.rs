//! HTTP handler for the freshness scanner

use axum::{
    extract::{Multipart, State},
    Json,
};
use shared::ScanResult;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Analyze the photo uploaded in the `image` multipart field
pub async fn scan_crop(State(state): State<AppState>, mut multipart: Multipart) -> AppResult<Json<ScanResult>> {
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid upload: {}", e)))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::ValidationError(format!("Invalid upload: {}", e)))?;
            image = Some(bytes);
        }
    }

    let image = image.ok_or_else(|| AppError::invalid("image", "Image is required"))?;
    let result = state.scanner.analyze(&image).await?;
    Ok(Json(result))
}
