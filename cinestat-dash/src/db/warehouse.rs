//! Query façade over the warehouse
//!
//! The single seam between the relational store and the aggregation
//! engine. Every method fetches one flat, typed row set; no shaping or
//! aggregation happens here. Fetchers may return empty sets; the engine
//! treats those under its general empty-group rules.

use cinestat_common::db::models::{AwardFact, CrewLink, PersonRow, RatingFact, TitleRow};
use cinestat_common::Result;
use sqlx::SqlitePool;

/// Warehouse row fetchers over a shared connection pool
#[derive(Debug, Clone)]
pub struct Warehouse {
    pool: SqlitePool,
}

impl Warehouse {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Genre vocabulary names ordered by flag-string position.
    /// Empty when the warehouse carries no `dim_genre` rows.
    pub async fn fetch_genre_vocabulary(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar("SELECT genre_name FROM dim_genre ORDER BY genre_idx")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    pub async fn fetch_titles(&self) -> Result<Vec<TitleRow>> {
        let rows = sqlx::query_as::<_, TitleRow>(
            "SELECT title_id, title_type, primary_title, release_year, genre_code FROM dim_title",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn fetch_ratings(&self) -> Result<Vec<RatingFact>> {
        let rows = sqlx::query_as::<_, RatingFact>(
            "SELECT title_id, avg_rating, num_votes FROM fact_ratings",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Highest-vote rating facts, for scatter sampling
    pub async fn fetch_top_ratings(&self, limit: i64) -> Result<Vec<RatingFact>> {
        let rows = sqlx::query_as::<_, RatingFact>(
            "SELECT title_id, avg_rating, num_votes FROM fact_ratings
             ORDER BY num_votes DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn fetch_crew(&self) -> Result<Vec<CrewLink>> {
        let rows = sqlx::query_as::<_, CrewLink>(
            "SELECT title_id, person_id, category FROM bridge_crew",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn fetch_persons(&self) -> Result<Vec<PersonRow>> {
        let rows = sqlx::query_as::<_, PersonRow>("SELECT person_id, full_name FROM dim_person")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Person lookup by exact name; first match when names collide
    pub async fn fetch_person_by_name(&self, full_name: &str) -> Result<Option<PersonRow>> {
        let row = sqlx::query_as::<_, PersonRow>(
            "SELECT person_id, full_name FROM dim_person WHERE full_name = ? LIMIT 1",
        )
        .bind(full_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Titles a person is credited on, in any crew role
    pub async fn fetch_titles_for_person(&self, person_id: &str) -> Result<Vec<TitleRow>> {
        let rows = sqlx::query_as::<_, TitleRow>(
            "SELECT DISTINCT t.title_id, t.title_type, t.primary_title, t.release_year, t.genre_code
             FROM dim_title t
             JOIN bridge_crew bc ON bc.title_id = t.title_id
             WHERE bc.person_id = ?",
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Rating facts for the titles a person is credited on
    pub async fn fetch_ratings_for_person(&self, person_id: &str) -> Result<Vec<RatingFact>> {
        let rows = sqlx::query_as::<_, RatingFact>(
            "SELECT DISTINCT fr.title_id, fr.avg_rating, fr.num_votes
             FROM fact_ratings fr
             JOIN bridge_crew bc ON bc.title_id = fr.title_id
             WHERE bc.person_id = ?",
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn fetch_awards(&self) -> Result<Vec<AwardFact>> {
        let rows = sqlx::query_as::<_, AwardFact>(
            "SELECT title_id, category, is_winner FROM fact_oscar_awards",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_titles(&self) -> Result<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM dim_title")
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn count_persons(&self) -> Result<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM dim_person")
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn count_award_wins(&self) -> Result<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM fact_oscar_awards WHERE is_winner = 1")
                .fetch_one(&self.pool)
                .await?,
        )
    }

    /// Mean rating across all rating facts; 0 for an empty warehouse
    pub async fn overall_mean_rating(&self) -> Result<f64> {
        let mean: Option<f64> = sqlx::query_scalar("SELECT AVG(avg_rating) FROM fact_ratings")
            .fetch_one(&self.pool)
            .await?;
        Ok(mean.unwrap_or(0.0))
    }
}
