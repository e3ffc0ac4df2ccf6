//! Trend projection
//!
//! Descriptive lookahead labeling for the per-year success chart: each
//! period's "predicted" value is simply the next period's actual, and the
//! final period gets a flat 5% growth heuristic. Deliberately not a
//! forecasting model.

use std::collections::HashMap;

use cinestat_common::db::models::{RatingFact, TitleRow};
use serde::{Deserialize, Serialize};

use crate::codec::GenreCodec;
use crate::rollup::{success_score, YearWindow};

/// Growth factor applied to the final period's actual value
const FINAL_PERIOD_GROWTH: f64 = 1.05;

/// One charted period with its actual and "predicted" value
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: i64,
    pub actual: f64,
    pub predicted: f64,
}

/// Project a time-ordered series into (period, actual, predicted) triples.
///
/// Input is re-sorted by period ascending so callers cannot accidentally
/// feed an unordered series. Empty input yields empty output.
pub fn project_trend(series: &[(i64, f64)]) -> Vec<TrendPoint> {
    let mut ordered: Vec<(i64, f64)> = series.to_vec();
    ordered.sort_by_key(|(period, _)| *period);

    let last = ordered.len().saturating_sub(1);
    ordered
        .iter()
        .enumerate()
        .map(|(i, &(period, actual))| {
            let predicted = if i < last {
                ordered[i + 1].1
            } else {
                (actual * FINAL_PERIOD_GROWTH).round()
            };
            TrendPoint { period, actual, predicted }
        })
        .collect()
}

/// Per-year mean success score for titles carrying `genre`, restricted to
/// the window. Produces the (period, value) series `project_trend` takes.
///
/// Titles without a release year, outside the window, or not carrying the
/// genre are skipped; so are titles without a rating fact. Years with no
/// surviving titles simply do not appear in the series.
pub fn yearly_success_series(
    titles: &[TitleRow],
    ratings: &[RatingFact],
    codec: &GenreCodec,
    genre: &str,
    window: YearWindow,
) -> Vec<(i64, f64)> {
    let ratings_by_title: HashMap<&str, &RatingFact> =
        ratings.iter().map(|r| (r.title_id.as_str(), r)).collect();

    let mut by_year: HashMap<i64, (f64, u64)> = HashMap::new();
    for title in titles {
        let Some(year) = title.release_year else {
            continue;
        };
        if !window.contains(year) {
            continue;
        }
        let Some(rating) = ratings_by_title.get(title.title_id.as_str()) else {
            continue;
        };
        if !codec.decode(title.genre_code.as_deref()).iter().any(|g| g == genre) {
            continue;
        }
        let entry = by_year.entry(year).or_insert((0.0, 0));
        entry.0 += success_score(rating.avg_rating, rating.num_votes);
        entry.1 += 1;
    }

    let mut series: Vec<(i64, f64)> = by_year
        .into_iter()
        .map(|(year, (sum, count))| (year, sum / count as f64))
        .collect();
    series.sort_by_key(|(year, _)| *year);
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::GenreVocabulary;

    #[test]
    fn test_lookahead_and_final_growth() {
        let points = project_trend(&[(2018, 10.0), (2019, 12.0), (2020, 15.0)]);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].predicted, 12.0);
        assert_eq!(points[1].predicted, 15.0);
        // round(15 * 1.05) = 16
        assert_eq!(points[2].predicted, 16.0);
    }

    #[test]
    fn test_unordered_input_is_sorted_by_period() {
        let points = project_trend(&[(2020, 15.0), (2018, 10.0), (2019, 12.0)]);
        let periods: Vec<i64> = points.iter().map(|p| p.period).collect();
        assert_eq!(periods, vec![2018, 2019, 2020]);
        assert_eq!(points[0].predicted, 12.0);
    }

    #[test]
    fn test_single_period_gets_growth_heuristic() {
        let points = project_trend(&[(2021, 100.0)]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].predicted, 105.0);
    }

    #[test]
    fn test_empty_series() {
        assert!(project_trend(&[]).is_empty());
    }

    #[test]
    fn test_yearly_success_series_filters_and_averages() {
        let codec = GenreCodec::new(GenreVocabulary::new(["Action", "Comedy"]));
        let title = |id: &str, year: i64, code: &str| TitleRow {
            title_id: id.to_string(),
            title_type: "movie".to_string(),
            primary_title: id.to_string(),
            release_year: Some(year),
            genre_code: Some(code.to_string()),
        };
        let rating = |id: &str, avg: f64, votes: i64| RatingFact {
            title_id: id.to_string(),
            avg_rating: avg,
            num_votes: votes,
        };

        let titles = vec![
            title("tt1", 2015, "TF"),
            title("tt2", 2015, "TF"),
            title("tt3", 2015, "FT"), // wrong genre
            title("tt4", 1990, "TF"), // outside window
        ];
        let ratings = vec![
            rating("tt1", 6.0, 99),
            rating("tt2", 8.0, 99),
            rating("tt3", 9.0, 99),
            rating("tt4", 9.0, 99),
        ];

        let window = YearWindow { start: 2010, end: 2019 };
        let series = yearly_success_series(&titles, &ratings, &codec, "Action", window);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].0, 2015);
        let expected = (6.0 + 8.0) / 2.0 * 100.0f64.ln();
        assert!((series[0].1 - expected).abs() < 1e-9);
    }
}
