//! Rollup aggregation
//!
//! Group-by reduction over flat warehouse rows, producing one summary
//! record per group: count, mean rating, success score, and share of the
//! total. Grouping may fan one row out into several groups (a title with
//! three genres contributes to three groups), so counts across groups can
//! exceed the row count.
//!
//! Output ordering is always explicit: the requested measure descending, a
//! secondary measure descending as tie-break, then group key ascending.
//! Nothing is ever left to input order.

use std::collections::HashMap;

use cinestat_common::db::models::{CrewLink, PersonRow, RatingFact, TitleRow};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::codec::GenreCodec;

/// One row ready for aggregation. `keys` is the (possibly fanned-out) set
/// of groups the row contributes to.
#[derive(Debug, Clone)]
pub struct Observation {
    pub keys: Vec<String>,
    pub avg_rating: f64,
    pub num_votes: i64,
}

/// One summary record per group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollupRecord {
    pub group_key: String,
    pub count: u64,
    pub mean_rating: f64,
    pub success_score: f64,
    /// Group count as a share of the total across all groups, rounded to
    /// two decimal places
    pub percentage: f64,
}

/// Primary sort measure. Each variant carries a fixed secondary tie-break;
/// the final tie-break is always the group key ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    /// success_score desc, then count desc
    SuccessScore,
    /// count desc, then mean_rating desc
    Count,
    /// mean_rating desc, then count desc
    MeanRating,
}

/// How a `min_count` threshold interacts with percentage denominators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinCountMode {
    /// Percentages are computed over the full unfiltered group set, then
    /// undersized groups are dropped (default)
    #[default]
    FilterAfterPercentage,
    /// Undersized groups are dropped first; percentages renormalize over
    /// the surviving groups
    FilterThenNormalize,
}

/// Inclusive release-year window. Always supplied by the caller; the
/// engine never reads the system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub start: i64,
    pub end: i64,
}

impl YearWindow {
    pub fn contains(&self, year: i64) -> bool {
        year >= self.start && year <= self.end
    }
}

/// Vote-dampened success score: `avg_rating × ln(1 + num_votes)`.
///
/// A raw rating average favors low-volume titles; log-votes dampens
/// outliers while still rewarding attention. This is the single scoring
/// formula used for genre, crew, and title rankings alike.
pub fn success_score(avg_rating: f64, num_votes: i64) -> f64 {
    avg_rating * (1.0 + num_votes.max(0) as f64).ln()
}

#[derive(Default)]
struct GroupAccumulator {
    count: u64,
    rating_sum: f64,
    weighted_sum: f64,
}

/// Aggregate observations into ranked rollup records.
///
/// Groups with zero contributing rows are never emitted. An empty input
/// yields an empty output; a zero total yields percentage 0 for every
/// group rather than dividing by zero.
pub fn rollup(
    observations: &[Observation],
    order: OrderBy,
    min_count: u64,
    mode: MinCountMode,
) -> Vec<RollupRecord> {
    let mut groups: HashMap<&str, GroupAccumulator> = HashMap::new();

    for obs in observations {
        let weighted = success_score(obs.avg_rating, obs.num_votes);
        for key in &obs.keys {
            let acc = groups.entry(key.as_str()).or_default();
            acc.count += 1;
            acc.rating_sum += obs.avg_rating;
            acc.weighted_sum += weighted;
        }
    }

    if mode == MinCountMode::FilterThenNormalize {
        groups.retain(|_, acc| acc.count >= min_count);
    }

    let total: u64 = groups.values().map(|acc| acc.count).sum();

    let mut records: Vec<RollupRecord> = groups
        .into_iter()
        .map(|(key, acc)| {
            let n = acc.count as f64;
            let percentage = if total == 0 {
                0.0
            } else {
                round2(acc.count as f64 / total as f64 * 100.0)
            };
            RollupRecord {
                group_key: key.to_string(),
                count: acc.count,
                mean_rating: acc.rating_sum / n,
                success_score: acc.weighted_sum / n,
                percentage,
            }
        })
        .collect();

    if mode == MinCountMode::FilterAfterPercentage {
        records.retain(|r| r.count >= min_count);
    }

    sort_records(&mut records, order);
    trace!(groups = records.len(), rows = observations.len(), "rollup complete");
    records
}

/// Join ratings to titles and roll up by decoded genre.
///
/// Titles outside the year window (or with an unknown release year, when a
/// window is given) are excluded. One title fans out into every genre its
/// flag string carries; titles without genre flags land in the "Unknown"
/// group. Output is ranked by success score.
pub fn rollup_by_genre(
    ratings: &[RatingFact],
    titles: &[TitleRow],
    codec: &GenreCodec,
    window: Option<YearWindow>,
) -> Vec<RollupRecord> {
    let observations = genre_observations(ratings, titles, codec, window);
    rollup(&observations, OrderBy::SuccessScore, 0, MinCountMode::default())
}

/// Build per-title observations keyed by decoded genre names
pub fn genre_observations(
    ratings: &[RatingFact],
    titles: &[TitleRow],
    codec: &GenreCodec,
    window: Option<YearWindow>,
) -> Vec<Observation> {
    let titles_by_id: HashMap<&str, &TitleRow> =
        titles.iter().map(|t| (t.title_id.as_str(), t)).collect();

    let mut observations = Vec::new();
    for rating in ratings {
        let Some(title) = titles_by_id.get(rating.title_id.as_str()) else {
            continue;
        };
        if let Some(window) = window {
            match title.release_year {
                Some(year) if window.contains(year) => {}
                _ => continue,
            }
        }
        observations.push(Observation {
            keys: codec.decode(title.genre_code.as_deref()),
            avg_rating: rating.avg_rating,
            num_votes: rating.num_votes,
        });
    }
    observations
}

/// Build per-credit observations keyed by person name.
///
/// One observation per (title, person) crew link whose role is in `roles`
/// and whose title has a rating fact. Links to unknown persons are skipped.
pub fn crew_observations(
    crew: &[CrewLink],
    persons: &[PersonRow],
    ratings: &[RatingFact],
    roles: &[&str],
) -> Vec<Observation> {
    let names_by_id: HashMap<&str, &str> = persons
        .iter()
        .map(|p| (p.person_id.as_str(), p.full_name.as_str()))
        .collect();
    let ratings_by_title: HashMap<&str, &RatingFact> =
        ratings.iter().map(|r| (r.title_id.as_str(), r)).collect();

    let mut observations = Vec::new();
    for link in crew {
        if !roles.contains(&link.category.as_str()) {
            continue;
        }
        let Some(name) = names_by_id.get(link.person_id.as_str()) else {
            continue;
        };
        let Some(rating) = ratings_by_title.get(link.title_id.as_str()) else {
            continue;
        };
        observations.push(Observation {
            keys: vec![name.to_string()],
            avg_rating: rating.avg_rating,
            num_votes: rating.num_votes,
        });
    }
    observations
}

/// Build count-only observations keyed by crew role category.
///
/// Rating measures are not meaningful here; mean_rating and success_score
/// come out as 0 and callers rank by count/percentage.
pub fn category_observations(crew: &[CrewLink]) -> Vec<Observation> {
    crew.iter()
        .map(|link| Observation {
            keys: vec![link.category.clone()],
            avg_rating: 0.0,
            num_votes: 0,
        })
        .collect()
}

fn sort_records(records: &mut [RollupRecord], order: OrderBy) {
    type Measure = fn(&RollupRecord) -> f64;
    let (primary, secondary): (Measure, Measure) = match order {
        OrderBy::SuccessScore => (measure_success, measure_count),
        OrderBy::Count => (measure_count, measure_mean),
        OrderBy::MeanRating => (measure_mean, measure_count),
    };

    records.sort_by(|a, b| {
        primary(b)
            .total_cmp(&primary(a))
            .then_with(|| secondary(b).total_cmp(&secondary(a)))
            .then_with(|| a.group_key.cmp(&b.group_key))
    });
}

fn measure_success(r: &RollupRecord) -> f64 {
    r.success_score
}

fn measure_count(r: &RollupRecord) -> f64 {
    r.count as f64
}

fn measure_mean(r: &RollupRecord) -> f64 {
    r.mean_rating
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
