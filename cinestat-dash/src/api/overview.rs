//! Dashboard overview counters

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub total_titles: i64,
    pub total_persons: i64,
    pub total_award_wins: i64,
    pub mean_rating: f64,
}

/// GET /api/stats/overview
///
/// Headline counters for the dashboard banner.
pub async fn get_overview(
    State(state): State<AppState>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let (total_titles, total_persons, total_award_wins, mean_rating) = tokio::try_join!(
        state.warehouse.count_titles(),
        state.warehouse.count_persons(),
        state.warehouse.count_award_wins(),
        state.warehouse.overall_mean_rating()
    )?;

    Ok(Json(OverviewResponse {
        total_titles,
        total_persons,
        total_award_wins,
        mean_rating,
    }))
}
