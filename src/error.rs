//! Error type shared by every chronomap operation.

use chronomap_types::{TypesError, Year};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChronoError>;

#[derive(Debug, Error)]
pub enum ChronoError {
    /// The interpolation source data is empty or malformed.
    #[error("Invalid series: {0}")]
    Domain(String),

    #[error("Year {year} is outside the known sample range [{min}, {max}]")]
    OutOfDomain { year: Year, min: Year, max: Year },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChronoError {
    /// Whether this error concerns a single entity and may be skipped.
    pub fn is_entity_level(&self) -> bool {
        matches!(
            self,
            Self::DegenerateGeometry(_) | Self::UnsupportedGeometry(_) | Self::InvalidInput(_)
        )
    }
}

impl From<TypesError> for ChronoError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::EmptySeries
            | TypesError::DuplicateYear(_)
            | TypesError::NonFiniteValue { .. } => Self::Domain(err.to_string()),
            TypesError::TooFewVertices(_)
            | TypesError::NonFiniteCoordinate { .. }
            | TypesError::EmptyMultiPart
            | TypesError::InvertedInterval { .. } => Self::DegenerateGeometry(err.to_string()),
            TypesError::InvertedRange { .. } => Self::InvalidConfig(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ChronoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
