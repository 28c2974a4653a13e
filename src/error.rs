//! Error Types: User-Facing Failure Modes
//!
//! Two kinds of failure exist in this library and only one of them lives
//! here. Ill-formed *input* (a scale list in the wrong order, a metric that
//! returns NaN, integer overflow during Smith reduction) is reported as a
//! [`TdaError`] so the caller can react. Violated *invariants* (mismatched
//! matrix shapes, face indices out of range, an unsorted filtration) are
//! programmer bugs and abort via assertions naming the invariant.

use thiserror::Error;

/// Errors reported for ill-formed input or numeric failure.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TdaError {
    /// The scale list must be strictly descending; `scales[position]`
    /// is not smaller than its predecessor.
    #[error("scale list must be strictly descending, violated at position {position}")]
    AscendingScales { position: usize },

    /// The metric returned a value outside the total order (NaN) for the
    /// pair of points at these indices.
    #[error("metric returned a non-comparable distance for points {i} and {j}")]
    NonMetricDistance { i: usize, j: usize },

    /// An intermediate value during integer elimination left the range of
    /// `i64`. Rerun on a smaller complex or reduce the scale list.
    #[error("integer overflow during Smith Normal Form reduction")]
    Overflow,
}
