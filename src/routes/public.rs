//! Public dashboard routes: headline counts, no authentication.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::services::counts::{self, DashboardCards, HeadlineCounts};
use crate::AppState;

/// GET /api/v1/public/counts: headline counts with card metadata.
pub async fn counts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardCards>>, AppError> {
    let counts = counts::fetch_counts(&state.db)
        .await
        .map_err(|e| e.retrieving("Error retrieving counts"))?;
    Ok(ApiResponse::success(
        "Counts retrieved successfully",
        counts.decorate(),
    ))
}

/// GET /api/v1/public/simple-counts: headline counts as bare integers.
pub async fn simple_counts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HeadlineCounts>>, AppError> {
    let counts = counts::fetch_counts(&state.db)
        .await
        .map_err(|e| e.retrieving("Error retrieving counts"))?;
    Ok(ApiResponse::success("Counts retrieved successfully", counts))
}
