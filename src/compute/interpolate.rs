//! Linear interpolation of sparse yearly samples.
//!
//! Values between two known years are interpolated linearly; known years
//! return their stored value untouched. Years outside the sampled span follow
//! an [`OutOfDomainPolicy`] chosen once per run.

use crate::config::OutOfDomainPolicy;
use crate::error::{ChronoError, Result};
use chronomap_types::Year;
use chronomap_types::series::{Sample, TimeSeries, YearRange};

/// Value of `series` at `year`.
///
/// # Examples
///
/// ```
/// use chronomap::compute::interpolate::interpolate;
/// use chronomap::{OutOfDomainPolicy, TimeSeries};
///
/// let series = TimeSeries::from_pairs([(1850, 100.0), (1900, 100_000.0)])?;
///
/// assert_eq!(interpolate(&series, 1875, OutOfDomainPolicy::Clamp)?, 50_050.0);
/// assert_eq!(interpolate(&series, 1850, OutOfDomainPolicy::Clamp)?, 100.0);
///
/// // Outside the samples: clamp to the nearest known value, or refuse.
/// assert_eq!(interpolate(&series, 1950, OutOfDomainPolicy::Clamp)?, 100_000.0);
/// assert!(interpolate(&series, 1950, OutOfDomainPolicy::Fail).is_err());
/// # Ok::<(), chronomap::ChronoError>(())
/// ```
pub fn interpolate(series: &TimeSeries, year: Year, policy: OutOfDomainPolicy) -> Result<f64> {
    if let Some(value) = series.get(year) {
        return Ok(value);
    }

    match (series.before(year), series.after(year)) {
        (Some(lo), Some(hi)) => Ok(lerp(lo, hi, year)),
        (before, after) => match policy {
            OutOfDomainPolicy::Clamp => {
                let nearest = before.or(after).unwrap_or_else(|| series.last());
                Ok(nearest.value)
            }
            OutOfDomainPolicy::Fail => Err(ChronoError::OutOfDomain {
                year,
                min: series.first().year,
                max: series.last().year,
            }),
        },
    }
}

fn lerp(lo: Sample, hi: Sample, year: Year) -> f64 {
    let span = (i64::from(hi.year) - i64::from(lo.year)) as f64;
    let elapsed = (i64::from(year) - i64::from(lo.year)) as f64;
    lo.value + (hi.value - lo.value) * elapsed / span
}

/// One value per year of `range`, in ascending order.
///
/// Under [`OutOfDomainPolicy::Fail`] the whole table fails if any year of the
/// range lies outside the samples; every frame depends on this table.
pub fn dense_series(
    series: &TimeSeries,
    range: YearRange,
    policy: OutOfDomainPolicy,
) -> Result<Vec<Sample>> {
    range
        .iter()
        .map(|year| interpolate(series, year, policy).map(|value| Sample::new(year, value)))
        .collect()
}
