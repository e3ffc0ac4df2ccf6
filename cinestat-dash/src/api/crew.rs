//! Crew profession ratio endpoint

use axum::extract::State;
use axum::Json;
use cinestat_engine::{category_observations, rollup, top_n, MinCountMode, OrderBy, SortDirection, SortField};
use serde::Serialize;

use super::ApiError;
use crate::AppState;

const TOP_PROFESSIONS: usize = 10;

#[derive(Debug, Serialize)]
pub struct ProfessionEntry {
    pub profession: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct CrewProfessionsResponse {
    pub professions: Vec<ProfessionEntry>,
}

/// GET /api/stats/crew-professions
///
/// Crew credits grouped by role category with each category's share of
/// all credits. Percentages are computed over the full unfiltered set,
/// so the emitted top-10 shares never exceed 100% combined.
pub async fn crew_professions(
    State(state): State<AppState>,
) -> Result<Json<CrewProfessionsResponse>, ApiError> {
    let crew = state.warehouse.fetch_crew().await?;

    let observations = category_observations(&crew);
    let records = rollup(&observations, OrderBy::Count, 0, MinCountMode::default());
    let top = top_n(
        records,
        TOP_PROFESSIONS,
        &[
            (SortField::Count, SortDirection::Descending),
            (SortField::GroupKey, SortDirection::Ascending),
        ],
    );

    let professions = top
        .into_iter()
        .map(|record| ProfessionEntry {
            profession: record.group_key,
            count: record.count,
            percentage: record.percentage,
        })
        .collect();

    Ok(Json(CrewProfessionsResponse { professions }))
}
