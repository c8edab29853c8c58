//! Error types for archive operations.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = ArchiveError> = core::result::Result<T, E>;

/// Errors returned by archive construction, insertion and queries.
///
/// Configuration errors (dimension, payload count) are reported before any
/// state is touched. Internal invariant violations are not represented here:
/// they indicate a bug and panic instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArchiveError {
    /// The requested dimensionality is not 3 or 4.
    #[error("unsupported dimension {0}, expected 3 or 4")]
    UnsupportedDimension(usize),

    /// A point or reference point has the wrong number of coordinates.
    #[error("expected {expected} coordinates, got {found}")]
    DimensionMismatch {
        /// Archive dimensionality.
        expected: usize,
        /// Length of the offending vector.
        found: usize,
    },

    /// A coordinate is NaN and cannot be ordered.
    #[error("coordinate {axis} is NaN")]
    NotANumber {
        /// Index of the first NaN coordinate.
        axis: usize,
    },

    /// The payload sequence is not parallel to the point sequence.
    #[error("{points} points but {payloads} payloads")]
    PayloadCountMismatch {
        /// Number of points supplied.
        points: usize,
        /// Number of payloads supplied.
        payloads: usize,
    },

    /// A hypervolume was requested but no reference point is set.
    #[error("a reference point is required to compute the hypervolume")]
    MissingReferencePoint,
}
