//! Integration tests for cinestat-dash API endpoints
//!
//! Each test builds the full router over a small seeded in-memory
//! warehouse and drives it with one-shot requests, asserting on status
//! codes and response shape.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

use cinestat_common::db::init_in_memory;
use cinestat_dash::{build_router, AppState, Warehouse};
use cinestat_engine::{GenreCodec, GenreVocabulary};

/// Test helper: seed a small warehouse with four genres, three titles,
/// two credited people and a handful of award facts
async fn seed_warehouse() -> SqlitePool {
    let pool = init_in_memory().await.expect("in-memory warehouse");

    sqlx::query(
        "INSERT INTO dim_genre (genre_idx, genre_name)
         VALUES (0, 'Action'), (1, 'Comedy'), (2, 'Drama'), (3, 'Horror')",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO dim_title (title_id, title_type, primary_title, release_year, genre_code)
         VALUES
           ('tt0001', 'movie', 'Iron Dawn',   2018, 'TFFF'),
           ('tt0002', 'movie', 'Quiet Jokes', 2019, 'FTFF'),
           ('tt0003', 'movie', 'Steel Tears', 2020, 'TFTF')",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO fact_ratings (title_id, avg_rating, num_votes)
         VALUES
           ('tt0001', 7.0, 1000),
           ('tt0002', 6.0, 10),
           ('tt0003', 8.0, 5000)",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO dim_person (person_id, full_name)
         VALUES ('nm0001', 'Ada Star'), ('nm0002', 'Ben Quill')",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO bridge_crew (title_id, person_id, category)
         VALUES
           ('tt0001', 'nm0001', 'actor'),
           ('tt0003', 'nm0001', 'actor'),
           ('tt0002', 'nm0002', 'writer'),
           ('tt0003', 'nm0002', 'director')",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO fact_oscar_awards (title_id, category, is_winner)
         VALUES
           ('tt0001', 'BEST PICTURE', 1),
           ('tt0002', 'BEST PICTURE', 0),
           ('tt0003', 'BEST PICTURE', 1),
           ('tt0001', 'DIRECTING', 0),
           ('tt0003', 'DIRECTING', 1)",
    )
    .execute(&pool)
    .await
    .unwrap();

    pool
}

/// Test helper: router over the seeded warehouse, codec built from the
/// seeded vocabulary
async fn setup_app() -> axum::Router {
    let pool = seed_warehouse().await;
    let warehouse = Warehouse::new(pool);
    let names = warehouse
        .fetch_genre_vocabulary()
        .await
        .expect("vocabulary fetch");
    let state = AppState::new(warehouse, GenreCodec::new(GenreVocabulary::new(names)));
    build_router(state)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = http_body_util::BodyExt::collect(body)
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse JSON")
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "cinestat-dash");
    assert_eq!(json["warehouse"], "reachable");
    assert_eq!(json["genre_count"], 4);
}

// =============================================================================
// Overview
// =============================================================================

#[tokio::test]
async fn test_overview_counters() {
    let app = setup_app().await;
    let response = app
        .oneshot(get_request("/api/stats/overview"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["total_titles"], 3);
    assert_eq!(json["total_persons"], 2);
    assert_eq!(json["total_award_wins"], 3);
    let mean = json["mean_rating"].as_f64().unwrap();
    assert!((mean - 7.0).abs() < 1e-9);
}

// =============================================================================
// Popular genres
// =============================================================================

#[tokio::test]
async fn test_popular_genres_window_and_order() {
    let app = setup_app().await;
    let response = app
        .oneshot(get_request("/api/stats/popular-genres?year=2020"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["window_start"], 2010);
    assert_eq!(json["window_end"], 2020);

    let genres = json["genres"].as_array().unwrap();
    // Drama carries only the high-vote tt0003, so its mean success score
    // beats Action's (which averages in tt0001); Comedy trails both
    assert_eq!(genres.len(), 3);
    assert_eq!(genres[0]["genre"], "Drama");
    assert_eq!(genres[1]["genre"], "Action");
    assert_eq!(genres[1]["total_titles"], 2);
    assert_eq!(genres[2]["genre"], "Comedy");
}

#[tokio::test]
async fn test_popular_genres_empty_window() {
    let app = setup_app().await;
    let response = app
        .oneshot(get_request("/api/stats/popular-genres?year=1950"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert!(json["genres"].as_array().unwrap().is_empty());
}

// =============================================================================
// Genre decade success
// =============================================================================

#[tokio::test]
async fn test_genre_decade_success() {
    let app = setup_app().await;
    let response = app
        .oneshot(post_request(
            "/api/stats/genre-decade-success",
            json!({"decade": 2010}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["decade"], 2010);
    let genres = json["genres"].as_array().unwrap();
    assert_eq!(genres.len(), 3);
    let t_tests = json["t_tests"].as_array().unwrap();
    assert_eq!(t_tests.len(), 3);
    for record in t_tests {
        assert!(record["p_value"].as_f64().is_some());
    }
}

#[tokio::test]
async fn test_genre_decade_rejects_out_of_range() {
    let app = setup_app().await;
    let response = app
        .oneshot(post_request(
            "/api/stats/genre-decade-success",
            json!({"decade": 123}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = extract_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("decade"));
}

// =============================================================================
// Genre trend
// =============================================================================

#[tokio::test]
async fn test_genre_trend_projection() {
    let app = setup_app().await;
    let response = app
        .oneshot(post_request(
            "/api/stats/genre-trend",
            json!({"genre": "Action", "start_year": 2018, "end_year": 2020}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["genre"], "Action");
    // Action appears in 2018 and 2020 only
    let points = json["points"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["period"], 2018);
    assert_eq!(points[1]["period"], 2020);
    // Final period predicts 5% growth over its actual
    let last_actual = points[1]["actual"].as_f64().unwrap();
    let last_predicted = points[1]["predicted"].as_f64().unwrap();
    assert_eq!(last_predicted, (last_actual * 1.05).round());
}

#[tokio::test]
async fn test_genre_trend_rejects_bad_range() {
    let app = setup_app().await;
    let response = app
        .oneshot(post_request(
            "/api/stats/genre-trend",
            json!({"genre": "Action", "start_year": 2020, "end_year": 2018}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_genre_trend_rejects_empty_genre() {
    let app = setup_app().await;
    let response = app
        .oneshot(post_request(
            "/api/stats/genre-trend",
            json!({"genre": "  ", "start_year": 2018, "end_year": 2020}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Actors
// =============================================================================

#[tokio::test]
async fn test_popular_actors_ranking() {
    let app = setup_app().await;
    let response = app
        .oneshot(get_request("/api/stats/popular-actors"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    let actors = json["actors"].as_array().unwrap();
    // Ben Quill has writer/director credits only, so Ada Star is the
    // sole acting entry
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0]["full_name"], "Ada Star");
    assert_eq!(actors[0]["total_titles"], 2);
    assert_eq!(actors[0]["rank"], 1);
    let avg = actors[0]["avg_rating"].as_f64().unwrap();
    assert!((avg - 7.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_actor_movies_profile() {
    let app = setup_app().await;
    let response = app
        .oneshot(post_request(
            "/api/stats/actor-movies",
            json!({"full_name": "Ada Star"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["actor"], "Ada Star");
    assert_eq!(json["total_movies"], 2);
    assert_eq!(json["total_votes"], 6000);

    let movies = json["movies"].as_array().unwrap();
    // Success score descending: Steel Tears (8.0 x ln 5001) first
    assert_eq!(movies[0]["title"], "Steel Tears");
    assert_eq!(movies[1]["title"], "Iron Dawn");
}

#[tokio::test]
async fn test_actor_movies_unknown_person() {
    let app = setup_app().await;
    let response = app
        .oneshot(post_request(
            "/api/stats/actor-movies",
            json!({"full_name": "Nobody Here"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = extract_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Nobody Here"));
}

#[tokio::test]
async fn test_actor_movies_blank_name() {
    let app = setup_app().await;
    let response = app
        .oneshot(post_request(
            "/api/stats/actor-movies",
            json!({"full_name": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Crew professions
// =============================================================================

#[tokio::test]
async fn test_crew_professions_shares() {
    let app = setup_app().await;
    let response = app
        .oneshot(get_request("/api/stats/crew-professions"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    let professions = json["professions"].as_array().unwrap();
    assert_eq!(professions.len(), 3);
    // actor has 2 of 4 credits
    assert_eq!(professions[0]["profession"], "actor");
    assert_eq!(professions[0]["count"], 2);
    let share = professions[0]["percentage"].as_f64().unwrap();
    assert!((share - 50.0).abs() < 1e-9);

    let total: f64 = professions
        .iter()
        .map(|p| p["percentage"].as_f64().unwrap())
        .sum();
    assert!((total - 100.0).abs() < 1e-6);
}

// =============================================================================
// Correlation
// =============================================================================

#[tokio::test]
async fn test_rating_votes_correlation() {
    let app = setup_app().await;
    let response = app
        .oneshot(get_request("/api/stats/rating-votes-correlation"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    assert_eq!(json["n"], 3);
    assert_eq!(json["computed"], true);
    let r = json["pearson_r"].as_f64().unwrap();
    assert!((-1.0..=1.0).contains(&r));

    // Scatter sample is vote-ordered
    let points = json["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0]["votes"], 5000);
}

// =============================================================================
// Awards
// =============================================================================

#[tokio::test]
async fn test_top_awards_and_independence() {
    let app = setup_app().await;
    let response = app
        .oneshot(get_request("/api/stats/top-awards"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = extract_json(response.into_body()).await;
    let top = json["top_by_wins"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["category"], "BEST PICTURE");
    assert_eq!(top[0]["total_wins"], 2);

    let independence = json["independence"].as_array().unwrap();
    assert_eq!(independence.len(), 2);
    for record in independence {
        assert!(record["chi_square"].as_f64().unwrap() >= 0.0);
        assert!(record["p_value"].as_f64().is_some());
    }
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = setup_app().await;
    let response = app
        .oneshot(get_request("/api/stats/does-not-exist"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = setup_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/stats/genre-trend")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
