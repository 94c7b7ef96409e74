//! Validation of run inputs before any frame is computed.

use crate::config::OutOfDomainPolicy;
use crate::error::{ChronoError, Result};
use chronomap_types::line::LineEntity;
use chronomap_types::series::{TimeSeries, YearRange};

/// Checks that every year of `range` can be interpolated under `policy`.
///
/// Only [`OutOfDomainPolicy::Fail`] can reject a range; clamping covers any year.
///
/// # Examples
///
/// ```
/// use chronomap::compute::validation::validate_series_coverage;
/// use chronomap::{OutOfDomainPolicy, TimeSeries, YearRange};
///
/// let series = TimeSeries::from_pairs([(1850, 1.0), (1900, 2.0)])?;
/// let range = YearRange::new(1850, 1950)?;
///
/// assert!(validate_series_coverage(&series, range, OutOfDomainPolicy::Clamp).is_ok());
/// assert!(validate_series_coverage(&series, range, OutOfDomainPolicy::Fail).is_err());
/// # Ok::<(), chronomap::ChronoError>(())
/// ```
pub fn validate_series_coverage(
    series: &TimeSeries,
    range: YearRange,
    policy: OutOfDomainPolicy,
) -> Result<()> {
    if policy == OutOfDomainPolicy::Clamp {
        return Ok(());
    }

    let domain = series.domain();
    let (min, max) = (*domain.start(), *domain.end());

    if range.min() < min {
        return Err(ChronoError::OutOfDomain {
            year: range.min(),
            min,
            max,
        });
    }
    if range.max() > max {
        return Err(ChronoError::OutOfDomain {
            year: range.max(),
            min,
            max,
        });
    }

    Ok(())
}

/// Validates a single line entity.
pub fn validate_entity(entity: &LineEntity) -> Result<()> {
    if entity.id.trim().is_empty() {
        return Err(ChronoError::InvalidInput(
            "Line entity id must not be empty".to_string(),
        ));
    }
    Ok(())
}
