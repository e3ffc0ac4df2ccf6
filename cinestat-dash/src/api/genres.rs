//! Genre statistics endpoints
//!
//! Popular genres over a trailing year window, per-decade genre success
//! with a t-test against the warehouse-wide mean rating, and the per-year
//! success trend for one genre.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Datelike;
use cinestat_engine::{
    genre_observations, group_rating_samples, project_trend, rollup_by_genre, t_test, top_n,
    yearly_success_series, RollupRecord, SortDirection, SortField, TTestRecord, TrendPoint,
    YearWindow,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ApiError;
use crate::AppState;

/// Trailing window size for the popular-genres rollup, in years
const POPULAR_GENRES_SPAN: i64 = 10;
const TOP_GENRES: usize = 10;

#[derive(Debug, Deserialize)]
pub struct PopularGenresQuery {
    /// Reference year for the trailing window; defaults to the current
    /// year (resolved here at the boundary, never inside the engine)
    pub year: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct GenreEntry {
    pub genre: String,
    pub total_titles: u64,
    pub mean_rating: f64,
    pub success_score: f64,
    pub percentage: f64,
}

impl From<RollupRecord> for GenreEntry {
    fn from(record: RollupRecord) -> Self {
        Self {
            genre: record.group_key,
            total_titles: record.count,
            mean_rating: record.mean_rating,
            success_score: record.success_score,
            percentage: record.percentage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PopularGenresResponse {
    pub window_start: i64,
    pub window_end: i64,
    pub genres: Vec<GenreEntry>,
}

/// GET /api/stats/popular-genres?year=YYYY
///
/// Genres ranked by success score over the trailing 10-year window.
pub async fn popular_genres(
    State(state): State<AppState>,
    Query(query): Query<PopularGenresQuery>,
) -> Result<Json<PopularGenresResponse>, ApiError> {
    let end = query
        .year
        .unwrap_or_else(|| chrono::Utc::now().year() as i64);
    let window = YearWindow {
        start: end - POPULAR_GENRES_SPAN,
        end,
    };

    let (titles, ratings) = tokio::try_join!(
        state.warehouse.fetch_titles(),
        state.warehouse.fetch_ratings()
    )?;
    debug!(titles = titles.len(), ratings = ratings.len(), "popular-genres rows fetched");

    let records = rollup_by_genre(&ratings, &titles, &state.codec, Some(window));
    let top = top_n(
        records,
        TOP_GENRES,
        &[
            (SortField::SuccessScore, SortDirection::Descending),
            (SortField::Count, SortDirection::Descending),
        ],
    );

    Ok(Json(PopularGenresResponse {
        window_start: window.start,
        window_end: window.end,
        genres: top.into_iter().map(GenreEntry::from).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct DecadeRequest {
    pub decade: i64,
}

#[derive(Debug, Serialize)]
pub struct GenreDecadeResponse {
    pub decade: i64,
    pub genres: Vec<GenreEntry>,
    /// Each genre's mean rating tested against the warehouse-wide mean
    pub t_tests: Vec<TTestRecord>,
}

/// POST /api/stats/genre-decade-success
///
/// Genres ranked by success score within one decade, with a one-sample
/// t-test of each genre's mean rating against the overall mean.
pub async fn genre_decade_success(
    State(state): State<AppState>,
    Json(request): Json<DecadeRequest>,
) -> Result<Json<GenreDecadeResponse>, ApiError> {
    if !(1880..=2100).contains(&request.decade) {
        return Err(ApiError::BadRequest(format!(
            "decade out of range: {}",
            request.decade
        )));
    }
    let window = YearWindow {
        start: request.decade,
        end: request.decade + 9,
    };

    let (titles, ratings, population_mean) = tokio::try_join!(
        state.warehouse.fetch_titles(),
        state.warehouse.fetch_ratings(),
        state.warehouse.overall_mean_rating()
    )?;

    let observations = genre_observations(&ratings, &titles, &state.codec, Some(window));
    let records = rollup_by_genre(&ratings, &titles, &state.codec, Some(window));
    let top = top_n(
        records,
        TOP_GENRES,
        &[
            (SortField::SuccessScore, SortDirection::Descending),
            (SortField::Count, SortDirection::Descending),
        ],
    );

    let samples = group_rating_samples(&observations);
    let t_tests = t_test(&samples, population_mean);

    Ok(Json(GenreDecadeResponse {
        decade: request.decade,
        genres: top.into_iter().map(GenreEntry::from).collect(),
        t_tests,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GenreTrendRequest {
    pub genre: String,
    pub start_year: i64,
    pub end_year: i64,
}

#[derive(Debug, Serialize)]
pub struct GenreTrendResponse {
    pub genre: String,
    pub points: Vec<TrendPoint>,
}

/// POST /api/stats/genre-trend
///
/// Per-year mean success score for one genre, with the naive lookahead
/// projection applied.
pub async fn genre_trend(
    State(state): State<AppState>,
    Json(request): Json<GenreTrendRequest>,
) -> Result<Json<GenreTrendResponse>, ApiError> {
    if request.genre.trim().is_empty() {
        return Err(ApiError::BadRequest("genre must not be empty".to_string()));
    }
    if request.start_year > request.end_year {
        return Err(ApiError::BadRequest(format!(
            "invalid year range: {}..{}",
            request.start_year, request.end_year
        )));
    }

    let window = YearWindow {
        start: request.start_year,
        end: request.end_year,
    };

    let (titles, ratings) = tokio::try_join!(
        state.warehouse.fetch_titles(),
        state.warehouse.fetch_ratings()
    )?;

    let series = yearly_success_series(&titles, &ratings, &state.codec, &request.genre, window);
    let points = project_trend(&series);

    Ok(Json(GenreTrendResponse {
        genre: request.genre,
        points,
    }))
}
