use crate::Year;
use thiserror::Error;

/// Violations of the invariants enforced by the type constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypesError {
    #[error("time series must contain at least one sample")]
    EmptySeries,

    #[error("duplicate sample for year {0}")]
    DuplicateYear(Year),

    #[error("sample value for year {year} must be finite, got: {value}")]
    NonFiniteValue { year: Year, value: f64 },

    #[error("polyline needs at least 2 vertices, got: {0}")]
    TooFewVertices(usize),

    #[error("vertex {index} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f64, y: f64 },

    #[error("multi-part geometry must contain at least one part")]
    EmptyMultiPart,

    #[error("construction interval starts after it ends: {start} > {end}")]
    InvertedInterval { start: Year, end: Year },

    #[error("year range is inverted: {min} > {max}")]
    InvertedRange { min: Year, max: Year },
}
