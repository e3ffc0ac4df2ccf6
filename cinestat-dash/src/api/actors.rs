//! Actor statistics endpoints

use axum::extract::State;
use axum::Json;
use cinestat_engine::{
    crew_observations, rollup, success_score, MinCountMode, OrderBy, SortDirection, SortField,
    top_n,
};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;

const TOP_ACTORS: usize = 10;

/// Crew role tags that count as acting credits
const ACTING_ROLES: &[&str] = &["actor", "actress"];

#[derive(Debug, Serialize)]
pub struct PopularActor {
    pub full_name: String,
    pub total_titles: u64,
    pub avg_rating: f64,
    pub rank: usize,
}

#[derive(Debug, Serialize)]
pub struct PopularActorsResponse {
    pub actors: Vec<PopularActor>,
}

/// GET /api/stats/popular-actors
///
/// Actors and actresses ranked by mean title rating, tie-broken by number
/// of rated titles.
pub async fn popular_actors(
    State(state): State<AppState>,
) -> Result<Json<PopularActorsResponse>, ApiError> {
    let (crew, persons, ratings) = tokio::try_join!(
        state.warehouse.fetch_crew(),
        state.warehouse.fetch_persons(),
        state.warehouse.fetch_ratings()
    )?;

    let observations = crew_observations(&crew, &persons, &ratings, ACTING_ROLES);
    let records = rollup(&observations, OrderBy::MeanRating, 0, MinCountMode::default());
    let top = top_n(
        records,
        TOP_ACTORS,
        &[
            (SortField::MeanRating, SortDirection::Descending),
            (SortField::Count, SortDirection::Descending),
        ],
    );

    let actors = top
        .into_iter()
        .enumerate()
        .map(|(idx, record)| PopularActor {
            full_name: record.group_key,
            total_titles: record.count,
            avg_rating: record.mean_rating,
            rank: idx + 1,
        })
        .collect();

    Ok(Json(PopularActorsResponse { actors }))
}

#[derive(Debug, Deserialize)]
pub struct ActorMoviesRequest {
    pub full_name: String,
}

#[derive(Debug, Serialize)]
pub struct ActorMovie {
    pub title_id: String,
    pub title: String,
    pub release_year: Option<i64>,
    pub avg_rating: f64,
    pub num_votes: i64,
    pub success_score: f64,
}

#[derive(Debug, Serialize)]
pub struct ActorProfileResponse {
    pub actor: String,
    pub total_movies: usize,
    pub avg_rating: f64,
    pub total_votes: i64,
    pub movies: Vec<ActorMovie>,
}

/// POST /api/stats/actor-movies
///
/// All rated titles a person is credited on, ranked by success score.
pub async fn actor_movies(
    State(state): State<AppState>,
    Json(request): Json<ActorMoviesRequest>,
) -> Result<Json<ActorProfileResponse>, ApiError> {
    let name = request.full_name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("full_name must not be empty".to_string()));
    }

    let person = state
        .warehouse
        .fetch_person_by_name(name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no person named '{}'", name)))?;

    let (titles, ratings) = tokio::try_join!(
        state.warehouse.fetch_titles_for_person(&person.person_id),
        state.warehouse.fetch_ratings_for_person(&person.person_id)
    )?;

    let titles_by_id: std::collections::HashMap<&str, _> =
        titles.iter().map(|t| (t.title_id.as_str(), t)).collect();

    let mut movies: Vec<ActorMovie> = ratings
        .iter()
        .filter_map(|rating| {
            let title = titles_by_id.get(rating.title_id.as_str())?;
            Some(ActorMovie {
                title_id: rating.title_id.clone(),
                title: title.primary_title.clone(),
                release_year: title.release_year,
                avg_rating: rating.avg_rating,
                num_votes: rating.num_votes,
                success_score: success_score(rating.avg_rating, rating.num_votes),
            })
        })
        .collect();
    movies.sort_by(|a, b| {
        b.success_score
            .total_cmp(&a.success_score)
            .then_with(|| a.title.cmp(&b.title))
    });

    let total_votes: i64 = movies.iter().map(|m| m.num_votes).sum();
    let avg_rating = if movies.is_empty() {
        0.0
    } else {
        movies.iter().map(|m| m.avg_rating).sum::<f64>() / movies.len() as f64
    };

    Ok(Json(ActorProfileResponse {
        actor: person.full_name,
        total_movies: movies.len(),
        avg_rating,
        total_votes,
        movies,
    }))
}
