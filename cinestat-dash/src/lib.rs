//! cinestat-dash library - Analytics dashboard service
//!
//! Serves dashboard-ready metrics computed by `cinestat-engine` over row
//! sets fetched from the film/awards warehouse. All statistics are pure
//! in-memory reductions; this crate only fetches rows, calls the engine,
//! and shapes JSON responses.

use std::sync::Arc;

use axum::Router;
use cinestat_engine::GenreCodec;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;

pub use db::warehouse::Warehouse;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Query façade over the warehouse
    pub warehouse: Warehouse,
    /// Genre codec built from the vocabulary loaded at startup
    pub codec: Arc<GenreCodec>,
}

impl AppState {
    pub fn new(warehouse: Warehouse, codec: GenreCodec) -> Self {
        Self {
            warehouse,
            codec: Arc::new(codec),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/stats/overview", get(api::overview::get_overview))
        .route("/api/stats/popular-genres", get(api::genres::popular_genres))
        .route("/api/stats/popular-actors", get(api::actors::popular_actors))
        .route("/api/stats/crew-professions", get(api::crew::crew_professions))
        .route(
            "/api/stats/rating-votes-correlation",
            get(api::correlation::rating_votes_correlation),
        )
        .route("/api/stats/top-awards", get(api::awards::top_awards))
        .route(
            "/api/stats/genre-decade-success",
            post(api::genres::genre_decade_success),
        )
        .route("/api/stats/genre-trend", post(api::genres::genre_trend))
        .route("/api/stats/actor-movies", post(api::actors::actor_movies))
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
