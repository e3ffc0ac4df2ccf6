//! Inferential statistics
//!
//! Pearson correlation, chi-square independence (2×k contingency), and
//! one-sample t-test. All three share the same discipline: degenerate
//! input (zero variance, zero sample size, zero expected count) never
//! raises; the result carries `computed: false` and a 0 statistic.
//!
//! Significance uses coarse fixed-threshold buckets rather than exact
//! CDF evaluation: chi-square against 3.841 (df=1, α=0.05) and t against
//! 1.96 / 2.576.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Chi-square critical value, df=1, α=0.05
const CHI_SQUARE_CRITICAL: f64 = 3.841;
/// Two-sided t critical value at α=0.05
const T_CRITICAL_05: f64 = 1.96;
/// Two-sided t critical value at α=0.01
const T_CRITICAL_01: f64 = 2.576;

/// Pearson correlation over paired observations
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub r: f64,
    pub n: usize,
    pub computed: bool,
}

/// Observed success/failure counts for one category of a 2×k contingency
#[derive(Debug, Clone)]
pub struct CategoryCounts {
    pub label: String,
    pub successes: u64,
    pub failures: u64,
}

/// Per-category chi-square contribution against the pooled expectation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChiSquareRecord {
    pub label: String,
    pub chi_square: f64,
    pub p_value: f64,
    pub significant: bool,
    pub computed: bool,
    pub observed_successes: u64,
    pub observed_failures: u64,
}

/// Summary sample for a one-sample t-test
#[derive(Debug, Clone)]
pub struct GroupSample {
    pub label: String,
    pub mean: f64,
    pub n: u64,
    pub stddev: f64,
}

/// One-sample t-test result for one group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTestRecord {
    pub label: String,
    pub t: f64,
    pub p_value: f64,
    pub significant: bool,
    pub computed: bool,
    pub n: u64,
}

/// Pearson correlation coefficient over (x, y) pairs.
///
/// Uses the centered-moment form: the expected input scale mixes ratings
/// in [0, 10] with vote counts in the millions, where the raw
/// sum-of-products form cancels catastrophically. Fewer than 2 pairs or
/// zero variance in either dimension yields r=0, computed=false.
pub fn pearson(pairs: &[(f64, f64)]) -> CorrelationResult {
    let n = pairs.len();
    if n < 2 {
        return CorrelationResult { r: 0.0, n, computed: false };
    }

    let nf = n as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = var_x.sqrt() * var_y.sqrt();
    if denom == 0.0 {
        return CorrelationResult { r: 0.0, n, computed: false };
    }

    CorrelationResult { r: cov / denom, n, computed: true }
}

/// Pearson correlation over two parallel slices.
///
/// Mismatched lengths are a caller bug and fail fast rather than being
/// silently truncated.
pub fn pearson_xy(xs: &[f64], ys: &[f64]) -> Result<CorrelationResult, EngineError> {
    if xs.len() != ys.len() {
        return Err(EngineError::MismatchedLengths {
            left: xs.len(),
            right: ys.len(),
        });
    }
    let pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    Ok(pearson(&pairs))
}

/// Chi-square independence test of success rate across categories.
///
/// The null expectation for each category is the pooled success rate over
/// all categories. A category whose expected success or failure count is 0
/// contributes χ²=0 with computed=false. Output is ranked by chi-square
/// descending, label ascending.
pub fn chi_square(categories: &[CategoryCounts]) -> Vec<ChiSquareRecord> {
    let total_successes: u64 = categories.iter().map(|c| c.successes).sum();
    let grand_total: u64 = categories.iter().map(|c| c.successes + c.failures).sum();
    let pooled_rate = if grand_total == 0 {
        0.0
    } else {
        total_successes as f64 / grand_total as f64
    };

    let mut records: Vec<ChiSquareRecord> = categories
        .iter()
        .map(|category| {
            let category_total = (category.successes + category.failures) as f64;
            let expected_successes = category_total * pooled_rate;
            let expected_failures = category_total * (1.0 - pooled_rate);

            let (chi, computed) = if expected_successes == 0.0 || expected_failures == 0.0 {
                (0.0, false)
            } else {
                let ds = category.successes as f64 - expected_successes;
                let df = category.failures as f64 - expected_failures;
                (
                    ds * ds / expected_successes + df * df / expected_failures,
                    true,
                )
            };

            let significant = chi > CHI_SQUARE_CRITICAL;
            ChiSquareRecord {
                label: category.label.clone(),
                chi_square: chi,
                p_value: if significant { 0.05 } else { 0.10 },
                significant,
                computed,
                observed_successes: category.successes,
                observed_failures: category.failures,
            }
        })
        .collect();

    records.sort_by(|a, b| {
        b.chi_square
            .total_cmp(&a.chi_square)
            .then_with(|| a.label.cmp(&b.label))
    });
    records
}

/// One-sample t-test of each group mean against a population mean.
///
/// t = (mean − population_mean) / (stddev / √n). A zero standard error
/// (n=0 or stddev=0) yields t=0, computed=false, never a division by
/// zero. p-values are the coarse |t| buckets {0.01, 0.05, 0.10}.
pub fn t_test(groups: &[GroupSample], population_mean: f64) -> Vec<TTestRecord> {
    groups
        .iter()
        .map(|group| {
            let standard_error = if group.n == 0 {
                0.0
            } else {
                group.stddev / (group.n as f64).sqrt()
            };

            let (t, computed) = if standard_error == 0.0 {
                (0.0, false)
            } else {
                ((group.mean - population_mean) / standard_error, true)
            };

            let p_value = if t.abs() > T_CRITICAL_01 {
                0.01
            } else if t.abs() > T_CRITICAL_05 {
                0.05
            } else {
                0.10
            };

            TTestRecord {
                label: group.label.clone(),
                t,
                p_value,
                significant: t.abs() > T_CRITICAL_05,
                computed,
                n: group.n,
            }
        })
        .collect()
}

/// Summarize observations into per-group rating samples (mean, n, sample
/// stddev), ready for `t_test`. Groups are emitted label-ascending.
///
/// Uses Welford's online algorithm; a single-row group gets stddev 0,
/// which `t_test` then reports as not computed.
pub fn group_rating_samples(observations: &[crate::rollup::Observation]) -> Vec<GroupSample> {
    use std::collections::HashMap;

    struct Welford {
        n: u64,
        mean: f64,
        m2: f64,
    }

    let mut groups: HashMap<&str, Welford> = HashMap::new();
    for obs in observations {
        for key in &obs.keys {
            let acc = groups.entry(key.as_str()).or_insert(Welford {
                n: 0,
                mean: 0.0,
                m2: 0.0,
            });
            acc.n += 1;
            let delta = obs.avg_rating - acc.mean;
            acc.mean += delta / acc.n as f64;
            acc.m2 += delta * (obs.avg_rating - acc.mean);
        }
    }

    let mut samples: Vec<GroupSample> = groups
        .into_iter()
        .map(|(label, acc)| {
            let stddev = if acc.n > 1 {
                (acc.m2 / (acc.n - 1) as f64).sqrt()
            } else {
                0.0
            };
            GroupSample {
                label: label.to_string(),
                mean: acc.mean,
                n: acc.n,
                stddev,
            }
        })
        .collect();
    samples.sort_by(|a, b| a.label.cmp(&b.label));
    samples
}
