//! Warehouse row models
//!
//! Flat row shapes as consumed by the aggregation engine. Each struct is
//! validated once at the warehouse boundary via `sqlx::FromRow`; the engine
//! only ever sees these typed records, never raw query results.

use serde::{Deserialize, Serialize};

/// One title from the `dim_title` dimension.
///
/// `genre_code` is a fixed-length flag string: character i is 'T' when the
/// title carries genre i of the genre vocabulary, 'F' (or absent) otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TitleRow {
    pub title_id: String,
    pub title_type: String,
    pub primary_title: String,
    pub release_year: Option<i64>,
    pub genre_code: Option<String>,
}

/// One rating fact per title (1:1 with `dim_title` in practice)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RatingFact {
    pub title_id: String,
    pub avg_rating: f64,
    pub num_votes: i64,
}

/// Bridge row linking a person to a title in one crew role
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CrewLink {
    pub title_id: String,
    pub person_id: String,
    pub category: String,
}

/// One person from the `dim_person` dimension
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersonRow {
    pub person_id: String,
    pub full_name: String,
}

/// One award nomination or win from `fact_oscar_awards`
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AwardFact {
    pub title_id: String,
    pub category: String,
    pub is_winner: bool,
}
