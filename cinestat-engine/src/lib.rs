//! # CineStat Statistical Aggregation Engine
//!
//! Pure, synchronous computation over already-fetched warehouse row sets:
//! - Genre flag-string codec (`codec`)
//! - Group-by rollup aggregation with deterministic ordering (`rollup`)
//! - Top-N ranking with multi-key sort (`rank`)
//! - Pearson correlation, chi-square independence, one-sample t-test (`stats`)
//! - Naive lookahead trend projection (`trend`)
//!
//! The engine holds no connections and no shared mutable state. Identical
//! inputs always produce identical outputs; anything clock-derived (year
//! windows) is passed in by the caller. Degenerate input (empty groups,
//! zero variance, zero sample size) never panics and never leaks NaN into a
//! result record; results carry an explicit `computed` flag instead.

pub mod codec;
pub mod error;
pub mod rank;
pub mod rollup;
pub mod stats;
pub mod trend;
pub mod vocab;

pub use codec::GenreCodec;
pub use error::EngineError;
pub use rank::{top_n, SortDirection, SortField};
pub use rollup::{
    category_observations, crew_observations, genre_observations, rollup, rollup_by_genre,
    success_score, MinCountMode, Observation, OrderBy, RollupRecord, YearWindow,
};
pub use stats::{
    chi_square, group_rating_samples, pearson, pearson_xy, t_test, CategoryCounts,
    ChiSquareRecord, CorrelationResult, GroupSample, TTestRecord,
};
pub use trend::{project_trend, yearly_success_series, TrendPoint};
pub use vocab::GenreVocabulary;
