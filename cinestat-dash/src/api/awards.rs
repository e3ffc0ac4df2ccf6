//! Award statistics endpoint

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use cinestat_engine::{chi_square, CategoryCounts, ChiSquareRecord};
use serde::Serialize;

use super::ApiError;
use crate::AppState;

const TOP_CATEGORIES: usize = 10;

#[derive(Debug, Serialize)]
pub struct CategoryWins {
    pub category: String,
    pub total_wins: u64,
}

#[derive(Debug, Serialize)]
pub struct TopAwardsResponse {
    pub top_by_wins: Vec<CategoryWins>,
    /// Chi-square of win/loss counts per category against the pooled win
    /// rate, ranked by chi-square descending
    pub independence: Vec<ChiSquareRecord>,
}

/// GET /api/stats/top-awards
///
/// Award categories ranked by total wins, plus a chi-square independence
/// test of win rate across categories.
pub async fn top_awards(
    State(state): State<AppState>,
) -> Result<Json<TopAwardsResponse>, ApiError> {
    let awards = state.warehouse.fetch_awards().await?;

    let mut by_category: HashMap<String, (u64, u64)> = HashMap::new();
    for award in &awards {
        let entry = by_category.entry(award.category.clone()).or_insert((0, 0));
        if award.is_winner {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let categories: Vec<CategoryCounts> = by_category
        .into_iter()
        .map(|(label, (wins, losses))| CategoryCounts {
            label,
            successes: wins,
            failures: losses,
        })
        .collect();

    let mut top_by_wins: Vec<CategoryWins> = categories
        .iter()
        .map(|c| CategoryWins {
            category: c.label.clone(),
            total_wins: c.successes,
        })
        .collect();
    top_by_wins.sort_by(|a, b| {
        b.total_wins
            .cmp(&a.total_wins)
            .then_with(|| a.category.cmp(&b.category))
    });
    top_by_wins.truncate(TOP_CATEGORIES);

    let independence = chi_square(&categories);

    Ok(Json(TopAwardsResponse {
        top_by_wins,
        independence,
    }))
}
