//! Common error types for CineStat

use thiserror::Error;

/// Common result type for CineStat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures the warehouse layer can actually produce. Request-level
/// problems (bad parameters, missing entities) are the dashboard's own
/// concern and never pass through here.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
