//! Admin dashboard routes: composite statistics, cards and moderation lists.

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::models::ad::Ad;
use crate::models::engineer::Engineer;
use crate::models::pagination::ListQuery;
use crate::models::product::PendingProduct;
use crate::models::shop::Shop;
use crate::services::counts::{self, DashboardCards};
use crate::services::dashboard::{self, DashboardStats};
use crate::services::listing::{self, Listing, PagedResult};
use crate::AppState;

/// GET /api/v1/admin/dashboard-stats: composite dashboard payload.
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let stats = dashboard::get_stats(
        &state.db,
        state.synthetic.as_ref(),
        state.config.regional_breakdown_limit,
    )
    .await
    .map_err(|e| e.retrieving("Error retrieving dashboard statistics"))?;
    Ok(ApiResponse::success(
        "Dashboard statistics retrieved successfully",
        stats,
    ))
}

/// GET /api/v1/admin/dashboard-cards: four decorated headline counts.
pub async fn cards(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<ApiResponse<DashboardCards>>, AppError> {
    let counts = counts::fetch_counts(&state.db)
        .await
        .map_err(|e| e.retrieving("Error retrieving dashboard cards"))?;
    Ok(ApiResponse::success(
        "Dashboard cards retrieved successfully",
        counts.decorate(),
    ))
}

/// GET /api/v1/admin/pending-approvals: products awaiting moderation.
pub async fn pending_approvals(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(Query(query), _): WithRejection<Query<ListQuery>, AppError>,
) -> Result<Json<ApiResponse<PagedResult<PendingProduct>>>, AppError> {
    list_resource(
        &state,
        &query,
        "Pending approvals retrieved successfully",
        "Error retrieving pending approvals",
    )
    .await
}

/// GET /api/v1/admin/engineers: engineers, optionally filtered by `verified`.
pub async fn engineers(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(Query(query), _): WithRejection<Query<ListQuery>, AppError>,
) -> Result<Json<ApiResponse<PagedResult<Engineer>>>, AppError> {
    list_resource(
        &state,
        &query,
        "Engineers retrieved successfully",
        "Error retrieving engineers",
    )
    .await
}

/// GET /api/v1/admin/shops: shops, optionally filtered by `verified`.
pub async fn shops(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(Query(query), _): WithRejection<Query<ListQuery>, AppError>,
) -> Result<Json<ApiResponse<PagedResult<Shop>>>, AppError> {
    list_resource(
        &state,
        &query,
        "Shops retrieved successfully",
        "Error retrieving shops",
    )
    .await
}

/// GET /api/v1/admin/ads: ads, optionally filtered by `active`.
pub async fn ads(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    WithRejection(Query(query), _): WithRejection<Query<ListQuery>, AppError>,
) -> Result<Json<ApiResponse<PagedResult<Ad>>>, AppError> {
    list_resource(
        &state,
        &query,
        "Ads retrieved successfully",
        "Error retrieving ads",
    )
    .await
}

async fn list_resource<T: Listing>(
    state: &AppState,
    query: &ListQuery,
    message: &str,
    failure: &'static str,
) -> Result<Json<ApiResponse<PagedResult<T>>>, AppError> {
    let params = query.parse(&T::SCHEMA)?;
    let page = listing::list::<T>(&state.db, &params)
        .await
        .map_err(|e| e.retrieving(failure))?;
    Ok(ApiResponse::success(message, page))
}
