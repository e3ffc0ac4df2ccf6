//! Engine error types
//!
//! Only caller contract violations surface as errors. Degenerate data
//! (zero variance, empty groups, malformed genre codes) is absorbed by the
//! individual operations and reported through `computed` flags instead.

use thiserror::Error;

/// Errors raised for caller contract violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Paired inputs must have equal lengths; silently truncating would
    /// hide caller bugs
    #[error("mismatched input lengths: {left} vs {right}")]
    MismatchedLengths { left: usize, right: usize },
}
