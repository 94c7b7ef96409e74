use crate::Year;
use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A single observation of the scalar series.
///
/// # Examples
///
/// ```
/// use chronomap_types::series::Sample;
///
/// let census = Sample::new(1870, 298_977.0);
/// assert_eq!(census.year, 1870);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub year: Year,
    pub value: f64,
}

impl Sample {
    pub fn new(year: Year, value: f64) -> Self {
        Self { year, value }
    }
}

impl From<(Year, f64)> for Sample {
    fn from((year, value): (Year, f64)) -> Self {
        Self { year, value }
    }
}

/// Sparse, irregularly spaced samples keyed by unique year.
///
/// A `TimeSeries` always holds at least one sample, never two samples for the
/// same year, and only finite values. It is immutable once built, so it can be
/// shared across threads as a read-only snapshot.
///
/// # Examples
///
/// ```
/// use chronomap_types::series::TimeSeries;
///
/// let series = TimeSeries::from_pairs([(1900, 1_698_575.0), (1850, 29_963.0)])?;
/// assert_eq!(series.first().year, 1850);
/// assert_eq!(series.last().year, 1900);
/// assert_eq!(series.get(1900), Some(1_698_575.0));
/// # Ok::<(), chronomap_types::TypesError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sample>", into = "Vec<Sample>")]
pub struct TimeSeries {
    // Sorted by year, unique, non-empty.
    samples: Vec<Sample>,
}

impl TimeSeries {
    /// Build a series from samples in any order.
    pub fn new(mut samples: Vec<Sample>) -> Result<Self, TypesError> {
        if samples.is_empty() {
            return Err(TypesError::EmptySeries);
        }

        if let Some(bad) = samples.iter().find(|s| !s.value.is_finite()) {
            return Err(TypesError::NonFiniteValue {
                year: bad.year,
                value: bad.value,
            });
        }

        samples.sort_by_key(|s| s.year);
        if let Some(pair) = samples.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(TypesError::DuplicateYear(pair[0].year));
        }

        Ok(Self { samples })
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, TypesError>
    where
        I: IntoIterator<Item = (Year, f64)>,
    {
        Self::new(pairs.into_iter().map(Sample::from).collect())
    }

    /// Exact stored value for `year`, if it is a known sample.
    pub fn get(&self, year: Year) -> Option<f64> {
        self.samples
            .binary_search_by_key(&year, |s| s.year)
            .ok()
            .map(|idx| self.samples[idx].value)
    }

    /// Nearest known sample strictly before `year`.
    pub fn before(&self, year: Year) -> Option<Sample> {
        let idx = self.samples.partition_point(|s| s.year < year);
        idx.checked_sub(1).map(|idx| self.samples[idx])
    }

    /// Nearest known sample strictly after `year`.
    pub fn after(&self, year: Year) -> Option<Sample> {
        let idx = self.samples.partition_point(|s| s.year <= year);
        self.samples.get(idx).copied()
    }

    pub fn first(&self) -> Sample {
        self.samples[0]
    }

    pub fn last(&self) -> Sample {
        self.samples[self.samples.len() - 1]
    }

    /// Inclusive span between the first and last known years.
    pub fn domain(&self) -> RangeInclusive<Year> {
        self.first().year..=self.last().year
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.samples.iter().copied()
    }
}

impl TryFrom<Vec<Sample>> for TimeSeries {
    type Error = TypesError;

    fn try_from(samples: Vec<Sample>) -> Result<Self, Self::Error> {
        Self::new(samples)
    }
}

impl From<TimeSeries> for Vec<Sample> {
    fn from(series: TimeSeries) -> Self {
        series.samples
    }
}

/// Inclusive range of years a time-lapse covers.
///
/// # Examples
///
/// ```
/// use chronomap_types::series::YearRange;
///
/// let range = YearRange::new(1850, 1852)?;
/// assert_eq!(range.iter().collect::<Vec<_>>(), vec![1850, 1851, 1852]);
/// assert_eq!(range.len(), 3);
/// # Ok::<(), chronomap_types::TypesError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    min: Year,
    max: Year,
}

#[derive(Deserialize)]
struct RawYearRange {
    min: Year,
    max: Year,
}

impl YearRange {
    pub const DEFAULT_MIN: Year = 1850;
    pub const DEFAULT_MAX: Year = 1950;

    pub fn new(min: Year, max: Year) -> Result<Self, TypesError> {
        if min > max {
            return Err(TypesError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Year {
        self.min
    }

    pub fn max(&self) -> Year {
        self.max
    }

    pub fn contains(&self, year: Year) -> bool {
        (self.min..=self.max).contains(&year)
    }

    /// Number of years covered, both ends included.
    pub fn len(&self) -> usize {
        (i64::from(self.max) - i64::from(self.min) + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Zero-based position of `year` in the range, used for frame numbering.
    pub fn index_of(&self, year: Year) -> Option<usize> {
        self.contains(year)
            .then(|| (i64::from(year) - i64::from(self.min)) as usize)
    }

    pub fn iter(&self) -> RangeInclusive<Year> {
        self.min..=self.max
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = TypesError;

    fn try_from(raw: RawYearRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl IntoIterator for YearRange {
    type Item = Year;
    type IntoIter = RangeInclusive<Year>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
