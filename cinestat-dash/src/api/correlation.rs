//! Rating/votes correlation endpoint

use axum::extract::State;
use axum::Json;
use cinestat_engine::pearson;
use serde::Serialize;

use super::ApiError;
use crate::AppState;

/// Scatter sample size (highest-vote titles)
const SCATTER_LIMIT: i64 = 200;

#[derive(Debug, Serialize)]
pub struct ScatterPoint {
    pub rating: f64,
    pub votes: i64,
}

#[derive(Debug, Serialize)]
pub struct CorrelationResponse {
    pub pearson_r: f64,
    pub n: usize,
    pub computed: bool,
    pub points: Vec<ScatterPoint>,
}

/// GET /api/stats/rating-votes-correlation
///
/// Pearson correlation between average rating and vote count across all
/// rating facts, with a top-200-by-votes scatter sample for charting.
pub async fn rating_votes_correlation(
    State(state): State<AppState>,
) -> Result<Json<CorrelationResponse>, ApiError> {
    let (ratings, scatter) = tokio::try_join!(
        state.warehouse.fetch_ratings(),
        state.warehouse.fetch_top_ratings(SCATTER_LIMIT)
    )?;

    let pairs: Vec<(f64, f64)> = ratings
        .iter()
        .map(|r| (r.avg_rating, r.num_votes as f64))
        .collect();
    let result = pearson(&pairs);

    let points = scatter
        .into_iter()
        .map(|r| ScatterPoint {
            rating: r.avg_rating,
            votes: r.num_votes,
        })
        .collect();

    Ok(Json(CorrelationResponse {
        pearson_r: result.r,
        n: result.n,
        computed: result.computed,
        points,
    }))
}
