//! Top-N ranking selector
//!
//! Stable multi-key sort plus truncation. Ties remaining after all keys
//! are exhausted keep the relative order the rollup's own deterministic
//! tie-break already established.

use crate::rollup::RollupRecord;
use std::cmp::Ordering;

/// Sortable fields of a rollup record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    SuccessScore,
    Count,
    MeanRating,
    Percentage,
    GroupKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Select the top `n` records under an ordered list of sort keys.
///
/// Returns at most `n` records; fewer when the input is smaller. Never
/// pads and never fails. Numeric comparisons use a total order, so NaN
/// (which the aggregator never emits anyway) cannot cause a panic.
pub fn top_n(
    mut records: Vec<RollupRecord>,
    n: usize,
    sort_keys: &[(SortField, SortDirection)],
) -> Vec<RollupRecord> {
    records.sort_by(|a, b| compare(a, b, sort_keys));
    records.truncate(n);
    records
}

fn compare(a: &RollupRecord, b: &RollupRecord, keys: &[(SortField, SortDirection)]) -> Ordering {
    for (field, direction) in keys {
        let ord = match field {
            SortField::SuccessScore => a.success_score.total_cmp(&b.success_score),
            SortField::Count => a.count.cmp(&b.count),
            SortField::MeanRating => a.mean_rating.total_cmp(&b.mean_rating),
            SortField::Percentage => a.percentage.total_cmp(&b.percentage),
            SortField::GroupKey => a.group_key.cmp(&b.group_key),
        };
        let ord = match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
